//! The `quizset init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizset.toml
    if std::path::Path::new("quizset.toml").exists() {
        println!("quizset.toml already exists, skipping.");
    } else {
        std::fs::write("quizset.toml", SAMPLE_CONFIG)?;
        println!("Created quizset.toml");
    }

    // Create example bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add questions to banks/example.toml");
    println!("  2. Run: quizset validate --bank banks/example.toml");
    println!("  3. Run: quizset draw --bank banks/example.toml");
    println!("  4. Run: quizset play --user <name> --bank banks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizset configuration

ledger_path = "./quizset-ledger.json"
# games dealt per `quizset play` session
games_per_session = 1

# budget = difficulty points per set (easy=1, medium=2, hard=3)
[rules.behavioral]
budget = 6
min_easy = 1
min_medium = 1
min_hard = 0

[rules.theoretical]
budget = 9
min_easy = 1
min_medium = 1
min_hard = 0

[rules.coding]
budget = 9
min_easy = 2
min_medium = 2
min_hard = 0
"#;

const EXAMPLE_BANK: &str = r#"[[questions]]
id = 1
category = "behavioral"
difficulty = 1
text = "Tell me about yourself."
time_limits = [120]

[[questions]]
id = 2
category = "behavioral"
difficulty = 1
text = "Why do you want to work here?"

[[questions]]
id = 3
category = "behavioral"
difficulty = 2
text = "Describe a time you disagreed with a teammate. What happened?"
answer = "Situation, task, action, result."

[[questions]]
id = 4
category = "behavioral"
difficulty = 3
text = "Tell me about a project that failed and what you would change."

[[questions]]
id = 5
category = "theoretical"
difficulty = 1
text = "What is the difference between a process and a thread?"

[[questions]]
id = 6
category = "theoretical"
difficulty = 2
text = "Explain how a hash map handles collisions."

[[questions]]
id = 7
category = "theoretical"
difficulty = 2
text = "What does Big-O notation describe?"

[[questions]]
id = 8
category = "theoretical"
difficulty = 3
text = "Explain the CAP theorem."

[[questions]]
id = 9
category = "coding"
difficulty = 1
text = "Reverse a string."
time_limits = [300]

[[questions]]
id = 10
category = "coding"
difficulty = 1
text = "Return the largest number in a list."

[[questions]]
id = 11
category = "coding"
difficulty = 2
text = "Check whether a string of brackets is balanced."

[[questions]]
id = 12
category = "coding"
difficulty = 2
text = "Merge two sorted lists."

[[questions]]
id = 13
category = "coding"
difficulty = 3
text = "Implement an LRU cache."
time_limits = [900, 300]
"#;
