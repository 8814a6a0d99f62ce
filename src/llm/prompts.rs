pub const COMMIT_MESSAGE: &str = r#"Do not use ```.
Create a CONVENTIONAL commit message for this git diff with the structure: <type>[optional scope]: <description>
Ignore formatting and whitespace changes and focus on the big picture."#;

pub const PR_DESCRIPTION: &str = r#"Do not use ```.
Create a pull request description for these changes.
Include: 1) A clear title, 2) What changes were made, 3) Why these changes were necessary,
and 4) Any testing considerations.
Ignore formatting and whitespace changes and focus on the big picture.
Write the description in GERMAN!!!
Format with markdown:"#;
