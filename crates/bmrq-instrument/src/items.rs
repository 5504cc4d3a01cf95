//! The fixed BMRQ item set.

use std::sync::LazyLock;

use serde::Serialize;

use crate::scoring::{REVERSE_POSITIONS, SCALE_MAX};

/// One questionnaire item. Immutable; the item set is fixed at build time.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    /// 1-based position in the instrument.
    pub position: u8,
    pub prompt: &'static str,
    /// Raw agreement scores on this item are inverted (`6 - raw`) before
    /// inclusion in the total.
    pub reverse_coded: bool,
}

/// Agreement labels for the 5-point scale, in ascending score order.
pub const CHOICES: [&str; SCALE_MAX as usize] = [
    "Strongly disagree",
    "Disagree",
    "Unsure",
    "Agree",
    "Strongly agree",
];

const PROMPTS: [&str; 20] = [
    "When I share music with someone I feel a special connection with that person.",
    "In my free time I hardly listen to music.",
    "I like listening to music that contains emotion.",
    "Music keeps me company when I am alone.",
    "I don't like to dance, not even with music I like.",
    "Music makes me bond with other people.",
    "I keep myself informed about the music I like.",
    "I get emotional listening to certain pieces of music.",
    "Music calms and relaxes me.",
    "Music often makes me want to dance.",
    "I am always looking for new music.",
    "I can become tearful or cry when I listen to a melody that I like very much.",
    "I like to sing or play an instrument with other people.",
    "Music helps me unwind and relieve stress.",
    "When I listen to a tune I like a lot I can't help humming or singing along.",
    "At a concert I feel connected to the performers and the audience.",
    "I spend quite a bit of money on music and related items.",
    "I sometimes get goosebumps when I hear a melody that I like.",
    "Music comforts me.",
    "When I hear a tune I like a lot I start tapping or moving to its rhythm.",
];

/// The 20 items in presentation order.
pub fn items() -> &'static [Item] {
    static ITEMS: LazyLock<Vec<Item>> = LazyLock::new(|| {
        PROMPTS
            .iter()
            .enumerate()
            .map(|(i, prompt)| {
                let position = (i + 1) as u8;
                Item {
                    position,
                    prompt,
                    reverse_coded: REVERSE_POSITIONS.contains(&position),
                }
            })
            .collect()
    });
    &ITEMS
}
