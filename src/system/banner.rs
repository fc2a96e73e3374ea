use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};

const BANNER_LINES: [&str; 6] = [
    r" ______     ______   ______     ______   ______   ______     ______",
    r"/\  ___\   /\  == \ /\  __ \   /\__  _\ /\__  _\ /\  ___\   /\  == \",
    r"\ \___  \  \ \  _-/ \ \ \/\ \  \/_/\ \/ \/_/\ \/ \ \  __\   \ \  __<",
    r" \/\_____\  \ \_\    \ \_____\    \ \_\    \ \_\  \ \_____\  \ \_\ \_\",
    r"  \/_____/   \/_/     \/_____/     \/_/     \/_/   \/_____/   \/_/ /_/",
    r"",
];

const COLOR_START: (u8, u8, u8) = (0xff, 0x8a, 0x3d);
const COLOR_END: (u8, u8, u8) = (0xe0, 0x2f, 0x6b);

pub(crate) fn print_cli_banner(no_color: bool) {
    let use_color = !no_color && std::io::stdout().is_terminal();
    let denom = BANNER_LINES.len().saturating_sub(1);
    for (idx, line) in BANNER_LINES.iter().enumerate() {
        if use_color {
            let (r, g, b) = gradient_rgb(COLOR_START, COLOR_END, idx, denom);
            println!("{}", line.with(Color::Rgb { r, g, b }));
        } else {
            println!("{line}");
        }
    }

    let description = format!(
        "spotter v{} | concurrent HTTP load generator",
        env!("CARGO_PKG_VERSION")
    );
    if use_color {
        let (r, g, b) = COLOR_END;
        println!("{}", description.with(Color::Rgb { r, g, b }));
    } else {
        println!("{description}");
    }
}

/// Linear blend from `start` (idx 0) to `end` (idx >= denom).
fn gradient_rgb(start: (u8, u8, u8), end: (u8, u8, u8), idx: usize, denom: usize) -> (u8, u8, u8) {
    let denom = denom.max(1);
    let idx = idx.min(denom);
    let lerp = |a: u8, b: u8| -> u8 {
        let (low, high, rising) = if b >= a { (a, b, true) } else { (b, a, false) };
        let span = usize::from(high.saturating_sub(low));
        let step = span
            .saturating_mul(idx)
            .checked_div(denom)
            .and_then(|step| u8::try_from(step).ok())
            .unwrap_or(0);
        if rising {
            a.saturating_add(step)
        } else {
            a.saturating_sub(step)
        }
    };
    (
        lerp(start.0, end.0),
        lerp(start.1, end.1),
        lerp(start.2, end.2),
    )
}
