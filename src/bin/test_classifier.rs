use colored::Colorize;
use groupnorm::classify::Classifier;
use groupnorm::cleaner::ValueCleaner;
use groupnorm::config::NormalizerConfig;
use groupnorm::entity::RiskLevel;

fn main() -> anyhow::Result<()> {
    println!("Group Classification Test Tool");
    println!("------------------------------");

    // Same rule sources as a real run
    let config = NormalizerConfig::load(None)?;
    let classifier: Classifier = config.classifier();
    let cleaner: ValueCleaner = config.cleaner();

    println!("\nType Rules:");
    for (index, rule) in classifier.type_rules().iter().enumerate() {
        println!(
            "{:>2}. {:?} contains {:?} → {}",
            index + 1,
            rule.field,
            rule.keywords,
            rule.group_type
        );
    }

    println!("\nRisk Rules:");
    for (index, rule) in classifier.risk_rules().iter().enumerate() {
        println!("{:>2}. {:?} → {}", index + 1, rule.when, rule.level);
    }

    println!("\nClassification Tests:");
    let cases = [
        ("Right Hindu Groups", "Hindu Jagruti Sena", 3543),
        ("Right Hindu Groups", "Hindu Seva Samithi", 15_000),
        ("Muslim Groups", "Muslim Welfare Trust", 4_000),
        ("Banned Organisations", "Students Islamic Movement", 800),
        ("Political Parties", "Janata Front", 75_000),
        ("Student Organisations", "Vidyarthi Parishad", 30_000),
        ("Farmers Associations", "Raitha Sangha", 9_000),
        ("Trade Unions", "Garment Workers Union", 52_000),
        ("Human Rights Organisations", "Civil Liberties Forum", 300),
        ("Kannada Organisations", "Karunadu Sena", 20_000),
        ("Cultural Forums", "Christian Choir Society", 11_000),
        ("Cultural Forums", "Ranga Forum", 150),
    ];

    for (sheet, name, members) in &cases {
        let group_type = classifier.determine_type(sheet, name);
        let risk = classifier.determine_risk_level(sheet, name, *members);
        let risk_str = risk.to_string();
        let colored_risk = match risk {
            RiskLevel::High => risk_str.bright_red(),
            RiskLevel::Medium => risk_str.bright_yellow(),
            RiskLevel::Low => risk_str.bright_green(),
        };
        println!(
            "'{}' / '{}' ({} members): {} / {}",
            sheet,
            name,
            members,
            group_type.to_string().bright_blue(),
            colored_risk
        );
    }

    println!("\nValue Cleaning Tests:");
    let raw_values = [
        "  NIL  ",
        "nil-organization",
        "N/A",
        "not manation",
        "Email ID: office@example.org",
        "Mail ID:",
        "  Bengaluru ",
    ];

    for raw in &raw_values {
        match cleaner.clean(Some(raw)) {
            Some(value) => println!("{:?} → {:?}", raw, value),
            None => println!("{:?} → {}", raw, "null".dimmed()),
        }
    }

    Ok(())
}
