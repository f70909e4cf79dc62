//! Four-glyph intensity code for a count delta.
//!
//! The delta magnitude is clamped, then divided down through four stages.
//! Each stage's quotient picks a glyph, so a bigger delta never gets a
//! lighter code.

/// Braille cells with 0 through 8 dots raised.
const DENSITY: [char; 9] = ['⠀', '⠁', '⠃', '⠇', '⡇', '⡏', '⡟', '⡿', '⣿'];

/// Coarse palette for the top stage.
const COARSE: [char; 3] = ['⠀', '▄', '█'];

const DIVISORS: [u64; 4] = [10, 8, 9, 9];

/// Largest magnitude that still changes the code: the point where the top
/// stage reaches its last glyph.
pub const CEILING: u64 = 10 * 8 * 9 * 9 * 2;

/// Shown when the delta is unknown.
pub const NO_DATA: &str = "····";

pub fn encode(count_delta: Option<i64>) -> String {
    let Some(delta) = count_delta else {
        return NO_DATA.to_string();
    };

    let mut value = delta.unsigned_abs().min(CEILING);
    let mut code = String::with_capacity(4 * 3);

    for (stage, divisor) in DIVISORS.iter().enumerate() {
        value /= divisor;
        let palette: &[char] = if stage == DIVISORS.len() - 1 {
            &COARSE
        } else {
            &DENSITY
        };
        let index = usize::try_from(value).unwrap_or(usize::MAX).min(palette.len() - 1);
        code.push(palette[index]);
    }

    code
}
