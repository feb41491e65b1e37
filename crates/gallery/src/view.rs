use carousel::stage::Stage;
use carousel::{Mutation, Slot};

fn lane(slot: Slot) -> isize {
    match slot {
        Slot::HiddenLeft => -1,
        Slot::HiddenRight => 5,
        visible => visible.visible_index().map_or(-1, |i| i as isize),
    }
}

/// One line per DOM change, in the vocabulary a stylesheet would see.
pub fn describe(mutation: &Mutation) -> String {
    match mutation {
        Mutation::Position { card, slot } => format!("card {card}: data-position={slot}"),
        Mutation::Transition { card, enabled } => {
            let value = if *enabled { "''" } else { "none" };
            format!("card {card}: style.transition={value}")
        }
        Mutation::Revealed { card } => format!("card {card}: +revealed"),
        Mutation::Caption { index, state } => format!("caption {index}: {state}"),
        Mutation::CaptionText { index, text } => format!("caption {index}: \"{text}\""),
        Mutation::Dragging(true) => "stack: +dragging".to_string(),
        Mutation::Dragging(false) => "stack: -dragging".to_string(),
    }
}

/// The cards left to right, centre in parentheses, followed by the active caption.
pub fn render(stage: &Stage) -> String {
    let mut cards: Vec<(usize, Slot)> = stage
        .cards()
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.slot))
        .collect();
    cards.sort_by_key(|&(_, slot)| lane(slot));

    let strip = cards
        .iter()
        .map(|&(i, slot)| match slot {
            Slot::Center => format!("({i})"),
            s if s.is_hidden() => format!("~{i}~"),
            _ => format!("[{i}]"),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let caption = stage
        .active_caption()
        .and_then(|i| stage.captions().get(i))
        .map(|c| c.text.to_string())
        .unwrap_or_default();

    format!("{strip}  {caption}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel::CaptionText;

    #[test]
    fn test_render_orders_by_slot() {
        let mut stage = Stage::new([
            (Slot::Right, CaptionText::new("a")),
            (Slot::FarRight, CaptionText::new("b")),
            (Slot::HiddenLeft, CaptionText::new("c")),
            (Slot::Left, CaptionText::new("d")),
            (Slot::Center, CaptionText::new("e")),
        ]);
        stage.activate_caption(4);
        assert_eq!(render(&stage), "~2~ [3] (4) [0] [1]  e");
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(&Mutation::Position {
                card: 0,
                slot: Slot::HiddenRight
            }),
            "card 0: data-position=hidden-right"
        );
        assert_eq!(
            describe(&Mutation::Transition {
                card: 0,
                enabled: false
            }),
            "card 0: style.transition=none"
        );
        assert_eq!(describe(&Mutation::Dragging(true)), "stack: +dragging");
    }
}
