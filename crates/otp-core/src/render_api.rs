use crate::scene::{Scene, SceneNode, TextStyle};
use crate::{Color, Rect};

/// Where widgets send their draw commands. Coordinates are widget-local pixels.
pub trait DrawSink {
    fn draw_round_rect(&mut self, rect: Rect, radius: f32, color: Color);
    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, style: &TextStyle);
}

impl DrawSink for Scene {
    fn draw_round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.nodes.push(SceneNode::Rect {
            rect,
            color,
            radius,
        });
    }

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, style: &TextStyle) {
        self.nodes.push(SceneNode::Text {
            rect,
            text: text.to_string(),
            color,
            style: style.clone(),
        });
    }
}
