use crate::{Color, Rect};

/// Renderable scene
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    Text {
        rect: Rect,
        text: String,
        color: Color,
        style: TextStyle,
    },
}

/// Font a text node is drawn with. Renderers resolve it the same way the
/// widget's glyph measurement did, so drawn digits line up with the layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextStyle {
    /// Pixel size.
    pub size: f32,
    /// `None` is the generic monospace family.
    pub family: Option<String>,
    pub bold: bool,
}

impl Scene {
    pub fn new(clear_color: Color) -> Self {
        Self {
            clear_color,
            nodes: Vec::new(),
        }
    }

    /// Shifts every node by `(dx, dy)`; used when a widget paints in local
    /// coordinates and the host places it elsewhere.
    pub fn offset(&mut self, dx: f32, dy: f32) {
        for node in &mut self.nodes {
            let rect = match node {
                SceneNode::Rect { rect, .. } | SceneNode::Text { rect, .. } => rect,
            };
            rect.x += dx;
            rect.y += dy;
        }
    }
}
