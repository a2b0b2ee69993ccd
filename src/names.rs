use rand::seq::SliceRandom;

const NAMES: [&str; 20] = [
    "Avery", "Riley", "Jordan", "Angel", "Parker", "Sawyer", "Peyton", "Quinn", "Blake", "Hayden",
    "Taylor", "Alexis", "Rowan", "Charlie", "Emerson", "Finley", "River", "Ariel", "Emery",
    "Morgan",
];

const ATTRIBUTES: [&str; 19] = [
    "Lazy",
    "Old",
    "Young",
    "Cranky",
    "Moody",
    "Lame",
    "Cool",
    "Wild",
    "Mad",
    "Holy",
    "Amazing",
    "Angry",
    "Anxious",
    "Demonic",
    "Fabulous",
    "Foolish",
    "Gentle",
    "Honorable",
    "Illustrious",
];

/// A generated "Attribute Name" pseudonym for users who have not picked a
/// display name yet.
#[must_use]
pub fn create_name() -> String {
    let mut rng = rand::thread_rng();
    let attribute = ATTRIBUTES.choose(&mut rng).unwrap_or(&"Nameless");
    let name = NAMES.choose(&mut rng).unwrap_or(&"Nobody");
    format!("{attribute} {name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_have_two_parts() {
        let name = create_name();
        let parts: Vec<&str> = name.split(' ').collect();
        assert_eq!(parts.len(), 2);
        assert!(ATTRIBUTES.contains(&parts[0]));
        assert!(NAMES.contains(&parts[1]));
    }
}
