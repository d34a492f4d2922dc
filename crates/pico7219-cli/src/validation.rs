//! Argument parsing helpers

/// LED coordinates as given on the command line (`ROW,COL`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub row: i32,
    pub col: i32,
}

/// Parse `ROW,COL`; any integers are accepted, the device ignores invisible pixels
pub fn parse_pixel(s: &str) -> Result<Pixel, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let row = row
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid row '{}': {}", row.trim(), e))?;
    let col = col
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid column '{}': {}", col.trim(), e))?;
    Ok(Pixel { row, col })
}
