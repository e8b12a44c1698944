/// Net brace delta for a line: `{` count minus `}` count.
///
/// Braces inside string and comment literals are counted like any other.
pub fn brace_delta(line: &str) -> i32 {
    let mut delta = 0i32;
    for ch in line.chars() {
        match ch {
            '{' => delta += 1,
            '}' => delta -= 1,
            _ => {}
        }
    }
    delta
}
