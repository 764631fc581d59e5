use otp_core::*;

/// Records draw commands in widget-local coordinates for later replay.
#[derive(Clone, Debug, Default)]
pub struct DrawScope {
    pub commands: Vec<DrawCommand>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    RoundRect {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    Text {
        text: String,
        rect: Rect,
        color: Color,
        style: TextStyle,
    },
}

impl DrawScope {
    pub fn round_rects(&self) -> impl Iterator<Item = (&Rect, &Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::RoundRect { rect, color, .. } => Some((rect, color)),
            DrawCommand::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &Rect)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, rect, .. } => Some((text.as_str(), rect)),
            DrawCommand::RoundRect { .. } => None,
        })
    }

    /// Replays the recorded commands into `scene`, placing local (0,0) at `origin`.
    pub fn replay(&self, scene: &mut Scene, origin: Vec2) {
        // local->global helper
        let to_global = |r: Rect| Rect {
            x: origin.x + r.x,
            y: origin.y + r.y,
            w: r.w,
            h: r.h,
        };
        for cmd in &self.commands {
            match cmd {
                DrawCommand::RoundRect {
                    rect,
                    color,
                    radius,
                } => scene.nodes.push(SceneNode::Rect {
                    rect: to_global(*rect),
                    color: *color,
                    radius: *radius,
                }),
                DrawCommand::Text {
                    text,
                    rect,
                    color,
                    style,
                } => scene.nodes.push(SceneNode::Text {
                    rect: to_global(*rect),
                    text: text.clone(),
                    color: *color,
                    style: style.clone(),
                }),
            }
        }
    }
}

impl DrawSink for DrawScope {
    fn draw_round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.commands.push(DrawCommand::RoundRect {
            rect,
            color,
            radius,
        });
    }

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            rect,
            color,
            style: style.clone(),
        });
    }
}
