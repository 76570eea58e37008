// Pointer / command input read line by line from stdin

use anyhow::{anyhow, bail, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer drag at canvas coordinates
    Drag { x: f64, y: f64 },
    /// Set the mobile angle directly (radians)
    SetAngle(f64),
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
///
/// Accepted forms: `x y`, `drag x y`, `angle <rad>`, `quit`.
pub fn parse_line(line: &str) -> Result<Option<InputEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let event = match words.as_slice() {
        ["quit"] | ["q"] => InputEvent::Quit,
        ["angle", a] => InputEvent::SetAngle(number(a)?),
        ["drag", x, y] | [x, y] => InputEvent::Drag {
            x: number(x)?,
            y: number(y)?,
        },
        _ => bail!("unrecognised input: {:?}", line),
    };
    Ok(Some(event))
}

fn number(word: &str) -> Result<f64> {
    let value: f64 = word
        .parse()
        .map_err(|_| anyhow!("not a number: {:?}", word))?;
    if !value.is_finite() {
        bail!("not a finite number: {:?}", word);
    }
    Ok(value)
}
