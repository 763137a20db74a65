//! Seed prompts for story generation.
//!
//! Each known genre has a fixed pair of hand-written openings; one is picked
//! at random per request. Unknown genres get a generic sentence and
//! multi-genre selections get a single "collide" prompt.

use crate::models::StorySelection;
use rand::seq::SliceRandom;
use rand::Rng;

/// Hand-written opening variants per genre. Lookup is exact and case-sensitive.
const PROMPT_VARIANTS: &[(&str, &[&str])] = &[
    (
        "Fantasy",
        &[
            "This is a **Fantasy** story. In the magical kingdom of Eldoria, a prophecy foretells of a young warrior who must retrieve the lost Blade of Eternity.",
            "This is a **Fantasy** adventure. A cursed sword, lost for centuries, reappears in the hands of a young hero destined for greatness.",
        ],
    ),
    (
        "Romantic",
        &[
            "This is a **Romantic** story. A missed train, a forgotten book, and a stranger who might just be the love of a lifetime.",
            "This is a **Romantic** tale. Two souls connected by letters finally meet, only to realize that neither is who they expected.",
        ],
    ),
    (
        "Mystery",
        &[
            "This is a **Mystery** story. A detective wakes up in a locked room with no memory of how he got there\u{2014}only a note that says 'RUN'.",
            "This is a **Mystery** thriller. A letter arrives with no sender, containing a single line: 'You have 48 hours to uncover the truth.'",
        ],
    ),
    (
        "Science Fiction",
        &[
            "This is a **Science Fiction** adventure. Humanity\u{2019}s last hope rests in the hands of a scientist who must make an impossible choice.",
            "This is a **Science Fiction** thriller. A rogue AI gains consciousness and starts rewriting human history in real-time.",
        ],
    ),
    (
        "Horror",
        &[
            "This is a **Horror** story. Every mirror in the house reflects a figure that isn't there.",
            "This is a **Horror** tale. A forgotten lullaby plays in the attic, but no one has been up there for years.",
        ],
    ),
    (
        "Adventure",
        &[
            "This is an **Adventure** story. An ancient pirate map leads to a treasure that could rewrite history.",
            "This is an **Adventure** quest. A skydiver lands in an unknown land\u{2014}where time itself seems frozen.",
        ],
    ),
    (
        "Comedy",
        &[
            "This is a **Comedy** story. A man wakes up to find he has swapped bodies with his pet cat\u{2014}for a whole week!",
            "This is a **Comedy** tale. A malfunctioning robot assistant takes everything way too literally, leading to complete chaos.",
        ],
    ),
    (
        "Thriller",
        &[
            "This is a **Thriller** story. A hacker receives a mysterious message: 'Decrypt this file, or the world ends at midnight.'",
            "This is a **Thriller** tale. A secret agent wakes up to find their entire identity erased overnight.",
        ],
    ),
    (
        "Cartoon",
        &[
            "This is a **Cartoon** story. A mischievous bunny invents a teleporting carrot\u{2014}and chaos follows!",
            "This is a **Cartoon** tale. A talking sandwich escapes from the fridge and starts a food rebellion.",
        ],
    ),
];

/// Prompt variants for a known genre.
pub fn variants_for(story_type: &str) -> Option<&'static [&'static str]> {
    PROMPT_VARIANTS
        .iter()
        .find(|(name, _)| *name == story_type)
        .map(|(_, variants)| *variants)
}

/// Genres with hand-written prompts, in catalog order.
pub fn known_story_types() -> impl Iterator<Item = &'static str> {
    PROMPT_VARIANTS.iter().map(|(name, _)| *name)
}

/// Pick a seed prompt for a single genre.
pub fn prompt_for_type<R: Rng + ?Sized>(story_type: &str, rng: &mut R) -> String {
    match variants_for(story_type).and_then(|variants| variants.choose(rng)) {
        Some(prompt) => (*prompt).to_string(),
        None => format!(
            "This is a {} story, filled with excitement and surprises.",
            story_type
        ),
    }
}

/// Build the prompt for several genres at once.
pub fn combo_prompt(story_types: &[String]) -> String {
    format!(
        "This is a {} story. In a world where {} collide, an unexpected Story begins.",
        story_types.join(" and "),
        story_types.join(", ")
    )
}

/// Seed prompt for a validated selection.
pub fn build_prompt<R: Rng + ?Sized>(selection: &StorySelection, rng: &mut R) -> String {
    match selection {
        StorySelection::Single(story_type) => prompt_for_type(story_type, rng),
        StorySelection::Combined(story_types) => combo_prompt(story_types),
    }
}
