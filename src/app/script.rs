// app/script.rs
// Frame-stamped page events for headless runs, e.g. `--click 120,80@30`

use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptAction {
    Click { x: f64, y: f64 },
    Scroll { scroll_y: f64 },
    ModalOpened,
    Resize { width: u32, height: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedEvent {
    pub frame: u64,
    pub action: ScriptAction,
}

fn split_frame(arg: &str) -> Result<(&str, u64), String> {
    let (body, frame) = arg
        .rsplit_once('@')
        .ok_or_else(|| format!("missing '@frame' in {:?}", arg))?;
    let frame = frame
        .trim()
        .parse()
        .map_err(|_| format!("bad frame number in {:?}", arg))?;
    Ok((body.trim(), frame))
}

fn number<T: FromStr>(value: &str, arg: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("bad number {:?} in {:?}", value, arg))
}

impl ScriptedEvent {
    /// `X,Y@FRAME`
    pub fn parse_click(arg: &str) -> Result<Self, String> {
        let (body, frame) = split_frame(arg)?;
        let (x, y) = body
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y in {:?}", arg))?;
        Ok(Self {
            frame,
            action: ScriptAction::Click {
                x: number(x, arg)?,
                y: number(y, arg)?,
            },
        })
    }

    /// `SCROLL_Y@FRAME`
    pub fn parse_scroll(arg: &str) -> Result<Self, String> {
        let (body, frame) = split_frame(arg)?;
        Ok(Self {
            frame,
            action: ScriptAction::Scroll {
                scroll_y: number(body, arg)?,
            },
        })
    }

    /// `FRAME`
    pub fn parse_modal(arg: &str) -> Result<Self, String> {
        Ok(Self {
            frame: number(arg, arg)?,
            action: ScriptAction::ModalOpened,
        })
    }

    /// `WIDTHxHEIGHT@FRAME`
    pub fn parse_resize(arg: &str) -> Result<Self, String> {
        let (body, frame) = split_frame(arg)?;
        let (w, h) = body
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT in {:?}", arg))?;
        Ok(Self {
            frame,
            action: ScriptAction::Resize {
                width: number(w, arg)?,
                height: number(h, arg)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_kind() {
        assert_eq!(
            ScriptedEvent::parse_click("120.5, 80@30").unwrap(),
            ScriptedEvent { frame: 30, action: ScriptAction::Click { x: 120.5, y: 80.0 } }
        );
        assert_eq!(
            ScriptedEvent::parse_scroll("450@12").unwrap().action,
            ScriptAction::Scroll { scroll_y: 450.0 }
        );
        assert_eq!(ScriptedEvent::parse_modal("7").unwrap().frame, 7);
        assert_eq!(
            ScriptedEvent::parse_resize("1024x768@90").unwrap(),
            ScriptedEvent { frame: 90, action: ScriptAction::Resize { width: 1024, height: 768 } }
        );
    }

    #[test]
    fn rejects_malformed_args() {
        assert!(ScriptedEvent::parse_click("120,80").is_err());
        assert!(ScriptedEvent::parse_click("120@3").is_err());
        assert!(ScriptedEvent::parse_scroll("down@3").is_err());
        assert!(ScriptedEvent::parse_resize("1024@3").is_err());
        assert!(ScriptedEvent::parse_modal("soon").is_err());
    }
}
