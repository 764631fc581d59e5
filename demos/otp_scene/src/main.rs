//! Drives an OTP field headlessly and prints the scene after each edit.
//!
//! Usage: `otp_scene [config.json] [density]`. Set `OTP_FONT` to a font file
//! to measure with it instead of the system monospace face.

use anyhow::Context;
use otp_core::*;
use otp_text::load_font_file;
use otp_ui::*;

fn print_scene(label: &str, scene: &Scene) {
    println!("-- {label}");
    for node in &scene.nodes {
        match node {
            SceneNode::Rect {
                rect,
                color,
                radius,
            } => println!(
                "  bar  [{:7.1} {:7.1} {:7.1} {:7.1}] r={radius} {}",
                rect.left(),
                rect.top(),
                rect.right(),
                rect.bottom(),
                color.to_argb_hex()
            ),
            SceneNode::Text {
                rect, text, style, ..
            } => println!(
                "  text {text:?} at x={:.1} y={:.1} {:.1}px {}",
                rect.x,
                rect.y,
                style.size,
                style.family.as_deref().unwrap_or("monospace")
            ),
        }
    }
}

fn render(field: &mut OtpField<BufferHost>, label: &str) {
    let mut scene = Scene::new(Color::from_rgb(0x12, 0x12, 0x12));
    field.draw(&mut scene);
    print_scene(label, &scene);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            OtpConfig::from_json(&json)?
        }
        None => OtpConfig::default(),
    };
    let scale = match args.next() {
        Some(d) => d.parse::<f32>().with_context(|| format!("bad density {d:?}"))?,
        None => 1.0,
    };

    if let Ok(font) = std::env::var("OTP_FONT") {
        let faces = load_font_file(&font)?;
        log::info!("loaded {faces} face(s) from {font}");
    }
    with_density(Density { scale }, || {
        let mut field = OtpField::from_config(BufferHost::new(), config.clone());
        let size = field.measure_and_resize();
        log::info!(
            "field {}x{} px, em {:.2}px, {} slots",
            size.width,
            size.height,
            field.em_size(),
            field.otp_count()
        );

        render(&mut field, "empty");
        for input in ["12", "3a", "4"] {
            field.type_text(input);
            render(&mut field, &format!("typed {input:?}"));
        }

        field.tap_at(0);
        println!("-- tapped slot 0, caret stays at {}", field.caret());

        let rest = "0".repeat(field.otp_count().saturating_sub(field.host().text_len()));
        field.type_text(&rest);
        render(&mut field, "complete");
        match field.code() {
            Some(code) => println!("code: {code}"),
            None => println!("code incomplete"),
        }
    });
    Ok(())
}
