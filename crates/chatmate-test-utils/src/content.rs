//! Artifact bodies for tests.

/// A well-formed artifact body with the given description.
pub fn chatmode_content(description: &str) -> String {
    format!(
        "---\ndescription: '{description}'\ntools: ['codebase', 'search']\n---\n# {description}\n\nFollow the steps.\n"
    )
}

/// A body with no metadata block, rejected by the content contract.
pub fn invalid_chatmode_content() -> String {
    "# Missing metadata\n\nNo delimited block here.\n".to_string()
}
