//! Dpad — steer a sprite with the arrow keys; A (Z) spins it, B (X) grows
//! it.

use vespa::prelude::*;

fn main() {
    env_logger::init();

    let mut x = 0.0f32;
    let mut y = 0.0f32;
    let mut angle = 0.0f32;

    Console::new("vespa — dpad")
        .cartridge(build_cartridge())
        .scene(move |canvas| {
            let buttons = canvas.buttons();
            let step = 0.02;
            if buttons.held(Buttons::LEFT) {
                x -= step;
            }
            if buttons.held(Buttons::RIGHT) {
                x += step;
            }
            if buttons.held(Buttons::UP) {
                y += step;
            }
            if buttons.held(Buttons::DOWN) {
                y -= step;
            }
            if buttons.held(Buttons::A) {
                angle += 3.0;
            }
            let size = if buttons.held(Buttons::B) { 2.0 } else { 1.0 };

            canvas.identity();
            canvas.push();
            canvas.translate(x, y);
            canvas.rotate(angle);
            canvas.scale(size, size);
            canvas.draw(&Sprite::new(0, 0, 16, 16));
            canvas.pop();
        })
        .run();
}

/// A cartridge with a single bright tile in the atlas corner, drawn with a
/// literal color border and a palette fill, the rest transparent.
fn build_cartridge() -> Vec<u8> {
    let mut bytes = vec![0x22, 0x01, 0x04, 0x80, 0x15];
    for y in 0..CANVAS_SIZE {
        for x in 0..CANVAS_SIZE {
            if x < 16 && y < 16 {
                let edge = x == 0 || y == 0 || x == 15 || y == 15;
                // White border, orange fill.
                bytes.push(if edge { 0x3F } else { 0x34 });
            } else {
                // Transparent outside the tile.
                bytes.push(0x00);
            }
        }
    }
    bytes.push(0x1A);
    bytes
}
