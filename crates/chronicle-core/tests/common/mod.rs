use chronicle_core::model::{Character, Event, Summary, Timeline};
use proptest::prelude::*;

/// Character with a name and age
#[allow(dead_code)]
pub fn character(name: &str, age: &str) -> Character {
    let mut c = Character::named(name);
    c.age = age.to_string();
    c
}

#[allow(dead_code)]
pub fn with_actions(mut c: Character, actions: &[&str]) -> Character {
    c.notable_actions = actions.iter().map(|s| s.to_string()).collect();
    c
}

#[allow(dead_code)]
pub fn event(time: &str, description: &str) -> Event {
    Event::new(time, description)
}

#[allow(dead_code)]
pub fn day(date: &str, events: Vec<Event>) -> Timeline {
    Timeline::new(date, events)
}

#[allow(dead_code)]
pub fn summary(characters: Vec<Character>, timeline: Vec<Timeline>) -> Summary {
    Summary::new(characters, timeline)
}

/// A fully populated character, aliases and actions already tidy
#[allow(dead_code)]
pub fn jane_full() -> Character {
    let mut c = Character::named("Jane");
    c.aliases = vec!["Janie".into(), "J".into()];
    c.kind = "main".into();
    c.role = "Student".into();
    c.age = "17".into();
    c.gender = "Female".into();
    c.species = "Human".into();
    c.personality = "Curious and stubborn".into();
    c.physical_description.height = "5'6\"".into();
    c.physical_description.build = "Slim".into();
    c.physical_description.hair = "Long red hair".into();
    c.physical_description.other = "Freckles".into();
    c.sexual_characteristics.other = "n/a".into();
    c.notable_actions = vec![
        "Saved the dog".into(),
        "Climbed the old lighthouse".into(),
        "Won the spelling bee".into(),
    ];
    c
}

// ========== proptest strategies ==========

#[allow(dead_code)]
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Jane".to_string()),
        Just("jane ".to_string()),
        Just("Bob".to_string()),
        Just("BOB".to_string()),
        Just("Mara".to_string()),
        Just("".to_string()),
        Just("  ".to_string()),
    ]
}

#[allow(dead_code)]
pub fn field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z]{1,6}( [a-z]{1,6}){0,2}"]
}

#[allow(dead_code)]
pub fn character_strategy() -> impl Strategy<Value = Character> {
    (
        name_strategy(),
        prop::collection::vec(name_strategy(), 0..3),
        field_strategy(),
        field_strategy(),
        field_strategy(),
        prop::collection::vec(field_strategy(), 0..3),
    )
        .prop_map(|(name, aliases, age, role, hair, actions)| {
            let mut c = Character::named(name);
            c.aliases = aliases;
            c.age = age;
            c.role = role;
            c.physical_description.hair = hair;
            c.notable_actions = actions;
            c
        })
}

#[allow(dead_code)]
pub fn event_strategy() -> impl Strategy<Value = Event> {
    (field_strategy(), field_strategy())
        .prop_map(|(time, description)| Event::new(time, description))
}

#[allow(dead_code)]
pub fn summary_strategy() -> impl Strategy<Value = Summary> {
    (
        prop::collection::vec(character_strategy(), 0..5),
        prop::collection::vec(
            (
                prop_oneof![Just("June 1"), Just("June 2"), Just("")],
                prop::collection::vec(event_strategy(), 0..4),
            )
                .prop_map(|(date, events)| Timeline::new(date, events)),
            0..3,
        ),
    )
        .prop_map(|(characters, timeline)| Summary::new(characters, timeline))
}
