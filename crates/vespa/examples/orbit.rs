//! Orbit — tiles from a procedural cartridge spinning around the canvas
//! center on the transform stack.

use vespa::prelude::*;

fn main() {
    env_logger::init();

    let mut angle = 0.0f32;
    Console::new("vespa — orbit")
        .cartridge(build_cartridge())
        .scene(move |canvas| {
            angle += 1.0;

            canvas.identity();
            for arm in 0..4 {
                canvas.push();
                canvas.rotate(angle + arm as f32 * 90.0);
                canvas.translate(0.5, 0.0);
                canvas.rotate(angle * 2.0);
                canvas.draw(&Sprite::new(16 * arm, 0, 16, 16));
                canvas.pop();
            }

            // A slowly counter-rotating tile in the center.
            canvas.push();
            canvas.rotate(-angle);
            canvas.draw(&Sprite::new(0, 16, 16, 16));
            canvas.pop();
        })
        .run();
}

/// A cartridge whose single image is a grid of 16×16 tiles cycling through
/// the brighter half of the palette, written as one literal byte per pixel.
fn build_cartridge() -> Vec<u8> {
    let mut bytes = vec![0x22, 0x01, 0x04, 0x80, 0x15];
    for y in 0..CANVAS_SIZE {
        for x in 0..CANVAS_SIZE {
            let tile = (x / 16 + y / 16 * 8) % 32 + 32;
            bytes.push(tile as u8);
        }
    }
    bytes.push(0x1A);
    bytes
}
