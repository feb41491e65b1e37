//! The control socket's line protocol: one command per line, arguments separated by
//! whitespace.
//!
//! ```text
//! next | prev                    arrow buttons
//! key <left|right|name>          keyboard
//! click <card>                   click on a card
//! down <x> [button] | move <x> | up <x> | leave-document
//! enter | exit                   pointer over / off the card stack
//! touch-start <x> | touch-end <x>
//! wheel <dx> [dy]               wheel over the card stack
//! carousel-wheel <dx> [dy]      wheel over the carousel, off the stack
//! scroll <dy>                    page scroll outside the carousel
//! lang <code> | reveal | reload | quit
//! ```

use crate::events::AppEvent;
use carousel::input::PRIMARY_BUTTON;
use carousel::{Direction, InputEvent, Key, Language};
use std::str::FromStr;
use strum::EnumString;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs a {1} argument")]
    MissingArgument(Verb, &'static str),
    #[error("Invalid {1} '{0}'")]
    Invalid(String, &'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, strum::Display)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum Verb {
    Next,
    Prev,
    Key,
    Click,
    Down,
    Move,
    Up,
    LeaveDocument,
    Enter,
    Exit,
    TouchStart,
    TouchEnd,
    Wheel,
    CarouselWheel,
    Scroll,
    Lang,
    Reveal,
    Reload,
    Quit,
}

struct Args<'a> {
    verb: Verb,
    rest: std::str::SplitWhitespace<'a>,
}

impl Args<'_> {
    fn required<T: FromStr>(&mut self, what: &'static str) -> Result<T, CommandError> {
        let raw = self
            .rest
            .next()
            .ok_or(CommandError::MissingArgument(self.verb, what))?;
        raw.parse()
            .map_err(|_| CommandError::Invalid(raw.to_string(), what))
    }

    fn optional<T: FromStr>(&mut self, what: &'static str) -> Result<Option<T>, CommandError> {
        self.rest
            .next()
            .map(|raw| {
                raw.parse()
                    .map_err(|_| CommandError::Invalid(raw.to_string(), what))
            })
            .transpose()
    }
}

fn parse_key(name: &str) -> Key {
    match name.to_ascii_lowercase().as_str() {
        "left" => Key::ArrowLeft,
        "right" => Key::ArrowRight,
        _ => name.parse().unwrap_or(Key::Other),
    }
}

pub fn parse(line: &str) -> Result<AppEvent, CommandError> {
    let mut words = line.split_whitespace();
    let word = words.next().ok_or(CommandError::Empty)?;
    let verb: Verb = word
        .parse()
        .map_err(|_| CommandError::Unknown(word.to_string()))?;
    let mut args = Args { verb, rest: words };

    let input = |event: InputEvent| -> Result<AppEvent, CommandError> {
        Ok(AppEvent::Input(event))
    };
    match verb {
        Verb::Next => input(InputEvent::ArrowButton(Direction::Next)),
        Verb::Prev => input(InputEvent::ArrowButton(Direction::Prev)),
        Verb::Key => {
            let name: String = args.required("key name")?;
            input(InputEvent::Key(parse_key(&name)))
        }
        Verb::Click => input(InputEvent::CardClick {
            card: args.required("card index")?,
        }),
        Verb::Down => input(InputEvent::PointerDown {
            x: args.required("x")?,
            button: args.optional("button")?.unwrap_or(PRIMARY_BUTTON),
        }),
        Verb::Move => input(InputEvent::PointerMove {
            x: args.required("x")?,
        }),
        Verb::Up => input(InputEvent::PointerUp {
            x: args.required("x")?,
        }),
        Verb::LeaveDocument => input(InputEvent::PointerLeaveDocument),
        Verb::Enter => input(InputEvent::StackEnter),
        Verb::Exit => input(InputEvent::StackLeave),
        Verb::TouchStart => input(InputEvent::TouchStart {
            x: args.required("x")?,
        }),
        Verb::TouchEnd => input(InputEvent::TouchEnd {
            x: args.required("x")?,
        }),
        Verb::Wheel => input(InputEvent::Wheel {
            dx: args.required("dx")?,
            dy: args.optional("dy")?.unwrap_or(0.0),
        }),
        Verb::CarouselWheel => input(InputEvent::CarouselWheel {
            dx: args.required("dx")?,
            dy: args.optional("dy")?.unwrap_or(0.0),
        }),
        Verb::Scroll => Ok(AppEvent::Scroll(args.required("dy")?)),
        Verb::Lang => Ok(AppEvent::Language(args.required::<Language>("language")?)),
        Verb::Reveal => Ok(AppEvent::Reveal),
        Verb::Reload => Ok(AppEvent::ConfigReload),
        Verb::Quit => Ok(AppEvent::Quit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_commands() {
        let cases = vec![
            ("next", InputEvent::ArrowButton(Direction::Next)),
            ("  PREV ", InputEvent::ArrowButton(Direction::Prev)),
            ("key left", InputEvent::Key(Key::ArrowLeft)),
            ("key ArrowRight", InputEvent::Key(Key::ArrowRight)),
            ("key Escape", InputEvent::Key(Key::Other)),
            ("click 3", InputEvent::CardClick { card: 3 }),
            (
                "down 100",
                InputEvent::PointerDown {
                    x: 100.0,
                    button: PRIMARY_BUTTON,
                },
            ),
            ("down 100 2", InputEvent::PointerDown { x: 100.0, button: 2 }),
            ("move 95.5", InputEvent::PointerMove { x: 95.5 }),
            ("up -4", InputEvent::PointerUp { x: -4.0 }),
            ("leave-document", InputEvent::PointerLeaveDocument),
            ("enter", InputEvent::StackEnter),
            ("exit", InputEvent::StackLeave),
            ("touch-start 300", InputEvent::TouchStart { x: 300.0 }),
            ("touch-end 240", InputEvent::TouchEnd { x: 240.0 }),
            ("wheel 20", InputEvent::Wheel { dx: 20.0, dy: 0.0 }),
            ("wheel 0 -90", InputEvent::Wheel { dx: 0.0, dy: -90.0 }),
            (
                "carousel-wheel -15 2",
                InputEvent::CarouselWheel { dx: -15.0, dy: 2.0 },
            ),
        ];

        for (line, expected) in cases {
            assert_eq!(parse(line), Ok(AppEvent::Input(expected)), "{line}");
        }
    }

    #[test]
    fn test_parse_page_commands() {
        assert_eq!(parse("scroll 120"), Ok(AppEvent::Scroll(120.0)));
        assert_eq!(parse("lang bg"), Ok(AppEvent::Language(Language::Bg)));
        assert_eq!(parse("reveal"), Ok(AppEvent::Reveal));
        assert_eq!(parse("reload"), Ok(AppEvent::ConfigReload));
        assert_eq!(parse("quit"), Ok(AppEvent::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(parse("jump"), Err(CommandError::Unknown("jump".into())));
        assert_eq!(
            parse("click"),
            Err(CommandError::MissingArgument(Verb::Click, "card index"))
        );
        assert_eq!(
            parse("click two"),
            Err(CommandError::Invalid("two".into(), "card index"))
        );
        assert_eq!(
            parse("lang es"),
            Err(CommandError::Invalid("es".into(), "language"))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CommandError::MissingArgument(Verb::TouchStart, "x").to_string(),
            "'touch-start' needs a x argument"
        );
    }
}
