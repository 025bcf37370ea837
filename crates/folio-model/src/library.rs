//! Whole-model replacement.
//!
//! A [`Library`] holds the current model behind a lock. Reloading builds the new model
//! outside the lock and swaps the pointer only on success. Readers take an `Arc` snapshot and
//! keep using it for as long as they like; replaced models are never mutated.

use std::{
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};

use folio_document::BundleError;
use tracing::{info, warn};

use crate::{BuildOptions, Model};

/// Owner of the current model.
#[derive(Debug)]
pub struct Library {
    /// The model readers currently see.
    current: RwLock<Arc<Model>>,
    /// Options used for every rebuild.
    options: BuildOptions,
}

impl Library {
    /// Builds the initial model from bundle text.
    pub fn new(text: &str, options: BuildOptions) -> Result<Self, BundleError> {
        let model = Model::build(text, &options)?;
        Ok(Self {
            current: RwLock::new(Arc::new(model)),
            options,
        })
    }

    /// Builds the initial model from a bundle file.
    pub fn load(path: &Path, options: BuildOptions) -> Result<Self, BundleError> {
        let model = Model::load(path, &options)?;
        Ok(Self {
            current: RwLock::new(Arc::new(model)),
            options,
        })
    }

    /// Returns the current model.
    pub fn snapshot(&self) -> Arc<Model> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the model with one built from `text`.
    ///
    /// On error the previous model stays in place.
    pub fn reload(&self, text: &str) -> Result<Arc<Model>, BundleError> {
        let model = match Model::build(text, &self.options) {
            Ok(model) => Arc::new(model),
            Err(e) => {
                warn!(error = %e, "reload failed; keeping previous model");
                return Err(e);
            }
        };

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::clone(&model);
        info!(pages = model.len(), "replaced page model");
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_swaps_whole_model() {
        let library = Library::new(r#"<!-- id:"home" --><!-- id:"a" parent:"home" -->"#, BuildOptions::default()).unwrap();
        let before = library.snapshot();

        library
            .reload(r#"<!-- id:"home" --><!-- id:"b" parent:"home" --><!-- id:"c" parent:"b" -->"#)
            .unwrap();
        let after = library.snapshot();

        assert_eq!(before.len(), 2);
        assert!(before.by_id("a").is_some());
        assert_eq!(after.len(), 3);
        assert!(after.by_id("a").is_none());
        assert_eq!(after.descendants(after.root_index()), 2);
    }

    #[test]
    fn failed_reload_keeps_previous_model() {
        let library = Library::new(r#"<!-- id:"home" -->"#, BuildOptions::default()).unwrap();
        assert!(matches!(library.reload("nothing"), Err(BundleError::NoPages)));
        assert_eq!(library.snapshot().root().id, "home");
    }
}
