//! Render surfaces.

use crate::error::{Result, ViewError};
use crate::generator::page;
use crate::markup::Element;
use crate::patch::{self, ViewPatch};
use tracing::{debug, trace};

/// Something a generated view can be mounted into and patched on.
pub trait Surface {
    /// Replaces the content of the element with id `container_id` by `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::MissingMountPoint`] if no element has that id.
    fn mount(&mut self, container_id: &str, tree: Element) -> Result<()>;

    /// Applies a patch to the mounted tree. Does nothing before mounting.
    fn apply(&mut self, patch: &ViewPatch);
}

/// In-memory document holding the mounted tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
    mounted_at: Option<String>,
}

impl Document {
    /// An empty document without any mount point.
    pub fn new() -> Self {
        Self {
            root: Element::new("main"),
            mounted_at: None,
        }
    }

    /// A document containing one empty container with id `id`.
    pub fn with_mount_point(id: &str) -> Self {
        Self {
            root: Element::new("main").child(Element::new("div").id(id)),
            mounted_at: None,
        }
    }

    /// The whole document tree.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The mounted view, if any.
    pub fn mounted(&self) -> Option<&Element> {
        let container = self.root.find_by_id(self.mounted_at.as_deref()?)?;
        container.child_nodes().first()?.as_element()
    }

    fn mounted_mut(&mut self) -> Option<&mut Element> {
        let id = self.mounted_at.as_deref()?;
        self.root.find_by_id_mut(id)?.first_child_element_mut()
    }

    /// Serializes the document tree.
    pub fn to_html(&self) -> String {
        self.root.to_html()
    }

    /// Serializes the document as a standalone HTML page.
    pub fn to_page(&self, title: &str) -> String {
        page(title, &self.root)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Document {
    fn mount(&mut self, container_id: &str, tree: Element) -> Result<()> {
        let container = self
            .root
            .find_by_id_mut(container_id)
            .ok_or_else(|| ViewError::MissingMountPoint(container_id.to_string()))?;

        container.replace_children(vec![tree.into()]);
        self.mounted_at = Some(container_id.to_string());
        debug!(container = container_id, "mounted view");
        Ok(())
    }

    fn apply(&mut self, patch: &ViewPatch) {
        match self.mounted_mut() {
            Some(tree) => patch::apply(tree, patch),
            None => trace!(?patch, "nothing mounted, patch dropped"),
        }
    }
}
