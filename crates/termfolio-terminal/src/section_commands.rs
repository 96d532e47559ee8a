//! Section commands: read-only projections of the profile record.
//!
//! Each command renders one part of the profile. Output order always follows
//! the order of the record's lists.

use termfolio_types::error::Result;
use termfolio_types::line::{LineEntry, ProjectCard};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// The section commands, in showcase order. `ls` and `cat` are derived
/// from this list.
pub const SECTION_COMMANDS: [&str; 7] = [
    "about",
    "skills",
    "education",
    "experience",
    "projects",
    "activities",
    "contact",
];

/// Register the seven section commands.
pub fn register_section_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(AboutCmd));
    reg.register(Box::new(SkillsCmd));
    reg.register(Box::new(EducationCmd));
    reg.register(Box::new(ExperienceCmd));
    reg.register(Box::new(ProjectsCmd));
    reg.register(Box::new(ActivitiesCmd));
    reg.register(Box::new(ContactCmd));
}

fn lines(lines: Vec<LineEntry>) -> Result<CommandOutput> {
    Ok(CommandOutput::Lines(lines))
}

// ---------------------------------------------------------------------------
// about
// ---------------------------------------------------------------------------

struct AboutCmd;
impl Command for AboutCmd {
    fn name(&self) -> &str {
        "about"
    }
    fn description(&self) -> &str {
        "Display basic information about me"
    }
    fn usage(&self) -> &str {
        "about"
    }
    fn category(&self) -> &str {
        "sections"
    }
    fn execute(&self, _args: &[&str], env: &Environment<'_>) -> Result<CommandOutput> {
        let p = env.profile(self.name())?;
        lines(vec![
            LineEntry::output(format!("Name: {}", p.personal.name)),
            LineEntry::output(format!("Location: {}", p.personal.location)),
            LineEntry::output(format!("Objective: {}", p.objective)),
        ])
    }
}

// ---------------------------------------------------------------------------
// skills
// ---------------------------------------------------------------------------

struct SkillsCmd;
impl Command for SkillsCmd {
    fn name(&self) -> &str {
        "skills"
    }
    fn description(&self) -> &str {
        "List my technical skills"
    }
    fn usage(&self) -> &str {
        "skills"
    }
    fn category(&self) -> &str {
        "sections"
    }
    fn execute(&self, _args: &[&str], env: &Environment<'_>) -> Result<CommandOutput> {
        let skills = &env.profile(self.name())?.skills;
        lines(vec![
            LineEntry::output("Technical Skills:"),
            LineEntry::output(skills.technical.join(", ")),
            LineEntry::output("Databases:"),
            LineEntry::output(skills.databases.join(", ")),
            LineEntry::output("Tools:"),
            LineEntry::output(skills.tools.join(", ")),
        ])
    }
}

// ---------------------------------------------------------------------------
// education
// ---------------------------------------------------------------------------

struct EducationCmd;
impl Command for EducationCmd {
    fn name(&self) -> &str {
        "education"
    }
    fn description(&self) -> &str {
        "Show my educational background"
    }
    fn usage(&self) -> &str {
        "education"
    }
    fn category(&self) -> &str {
        "sections"
    }
    fn execute(&self, _args: &[&str], env: &Environment<'_>) -> Result<CommandOutput> {
        let p = env.profile(self.name())?;
        lines(
            p.education
                .iter()
                .map(|edu| {
                    LineEntry::output(format!(
                        "{} - {} ({})",
                        edu.degree, edu.institution, edu.duration
                    ))
                })
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// experience
// ---------------------------------------------------------------------------

struct ExperienceCmd;
impl Command for ExperienceCmd {
    fn name(&self) -> &str {
        "experience"
    }
    fn description(&self) -> &str {
        "Display my work experience"
    }
    fn usage(&self) -> &str {
        "experience"
    }
    fn category(&self) -> &str {
        "sections"
    }
    fn execute(&self, _args: &[&str], env: &Environment<'_>) -> Result<CommandOutput> {
        let p = env.profile(self.name())?;
        let mut out = Vec::new();
        for exp in &p.experience {
            out.push(LineEntry::output(format!(
                "{} at {}, {}",
                exp.title, exp.company, exp.location
            )));
            out.push(LineEntry::output(format!("Duration: {}", exp.duration)));
            out.push(LineEntry::output("Responsibilities:"));
            out.extend(
                exp.responsibilities
                    .iter()
                    .map(|r| LineEntry::output(format!("- {r}"))),
            );
            out.push(LineEntry::output(""));
        }
        lines(out)
    }
}

// ---------------------------------------------------------------------------
// projects
// ---------------------------------------------------------------------------

struct ProjectsCmd;
impl Command for ProjectsCmd {
    fn name(&self) -> &str {
        "projects"
    }
    fn description(&self) -> &str {
        "Show my projects"
    }
    fn usage(&self) -> &str {
        "projects"
    }
    fn category(&self) -> &str {
        "sections"
    }
    fn execute(&self, _args: &[&str], env: &Environment<'_>) -> Result<CommandOutput> {
        let p = env.profile(self.name())?;
        let mut out = Vec::with_capacity(p.projects.len() + 1);
        out.push(LineEntry::highlight("My Projects:"));
        out.extend(
            p.projects
                .iter()
                .map(|project| LineEntry::card(ProjectCard::from(project))),
        );
        lines(out)
    }
}

// ---------------------------------------------------------------------------
// activities
// ---------------------------------------------------------------------------

struct ActivitiesCmd;
impl Command for ActivitiesCmd {
    fn name(&self) -> &str {
        "activities"
    }
    fn description(&self) -> &str {
        "List my extracurricular activities"
    }
    fn usage(&self) -> &str {
        "activities"
    }
    fn category(&self) -> &str {
        "sections"
    }
    fn execute(&self, _args: &[&str], env: &Environment<'_>) -> Result<CommandOutput> {
        let p = env.profile(self.name())?;
        lines(
            p.activities
                .iter()
                .map(|a| LineEntry::output(format!("- {a}")))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// contact
// ---------------------------------------------------------------------------

struct ContactCmd;
impl Command for ContactCmd {
    fn name(&self) -> &str {
        "contact"
    }
    fn description(&self) -> &str {
        "Show my contact information"
    }
    fn usage(&self) -> &str {
        "contact"
    }
    fn category(&self) -> &str {
        "sections"
    }
    fn execute(&self, _args: &[&str], env: &Environment<'_>) -> Result<CommandOutput> {
        let personal = &env.profile(self.name())?.personal;
        lines(vec![
            LineEntry::output(format!("Email: {}", personal.email)),
            LineEntry::output(format!("Phone: {}", personal.phone)),
            LineEntry::output(format!("LinkedIn: {}", personal.linkedin)),
            LineEntry::output(format!("Portfolio: {}", personal.portfolio)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termfolio_types::line::LineKind;
    use termfolio_types::profile::ProfileRecord;

    fn sample() -> ProfileRecord {
        ProfileRecord::from_json(
            r#"{
            "personal": {
                "name": "Ada Lovelace", "phone": "+44 1", "location": "London",
                "email": "ada@example.com", "linkedin": "linkedin.com/ada",
                "portfolio": "ada.dev"
            },
            "objective": "Compute things.",
            "education": [
                { "degree": "Mathematics", "institution": "Home", "duration": "1830-1835" },
                { "degree": "Logic", "institution": "De Morgan", "duration": "1840-1842" }
            ],
            "skills": { "technical": ["HTML", "CSS"], "databases": ["SQL"], "tools": ["Git"] },
            "experience": [
                { "title": "Analyst", "company": "Babbage & Co", "location": "London",
                  "duration": "1842 - 1843",
                  "responsibilities": ["Wrote Note G", "Translated Menabrea"] },
                { "title": "Author", "company": "Self", "location": "Surrey",
                  "duration": "1843", "responsibilities": [] }
            ],
            "projects": [
                { "name": "Note G", "description": "Bernoulli numbers", "isLive": true,
                  "github": "https://github.com/ada/note-g" },
                { "name": "Poetical Science", "description": "Essays" }
            ],
            "activities": ["Riding", "Music", "Gambling"]
        }"#,
        )
        .unwrap()
    }

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        register_section_commands(&mut reg);
        reg
    }

    fn run(cmd: &str) -> Vec<LineEntry> {
        let p = sample();
        registry()
            .interpret(cmd, &Environment::with_profile(&p))
            .into_lines()
    }

    fn texts(lines: &[LineEntry]) -> Vec<&str> {
        lines.iter().filter_map(LineEntry::as_text).collect()
    }

    #[test]
    fn about_projects_name_location_objective() {
        let out = run("about");
        assert_eq!(
            texts(&out),
            vec![
                "Name: Ada Lovelace",
                "Location: London",
                "Objective: Compute things."
            ]
        );
        assert!(out.iter().all(|l| l.kind == LineKind::Output));
    }

    #[test]
    fn skills_yields_three_headed_groups() {
        let out = run("skills");
        assert_eq!(
            texts(&out),
            vec!["Technical Skills:", "HTML, CSS", "Databases:", "SQL", "Tools:", "Git"]
        );
    }

    #[test]
    fn education_is_one_line_per_entry_in_order() {
        let out = run("education");
        assert_eq!(
            texts(&out),
            vec![
                "Mathematics - Home (1830-1835)",
                "Logic - De Morgan (1840-1842)"
            ]
        );
    }

    #[test]
    fn experience_blocks_are_flattened_in_order() {
        let out = run("experience");
        assert_eq!(
            texts(&out),
            vec![
                "Analyst at Babbage & Co, London",
                "Duration: 1842 - 1843",
                "Responsibilities:",
                "- Wrote Note G",
                "- Translated Menabrea",
                "",
                "Author at Self, Surrey",
                "Duration: 1843",
                "Responsibilities:",
                "",
            ]
        );
    }

    #[test]
    fn projects_header_then_one_card_per_project() {
        let out = run("projects");
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].kind, LineKind::SystemHighlight);
        assert_eq!(out[0].as_text(), Some("My Projects:"));

        let cards: Vec<&ProjectCard> = out[1..].iter().filter_map(LineEntry::as_card).collect();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Note G");
        assert!(cards[0].is_live);
        assert_eq!(cards[0].activate(), Some("https://github.com/ada/note-g"));
        assert_eq!(cards[1].name, "Poetical Science");
        assert!(!cards[1].is_live);
        assert_eq!(cards[1].activate(), None);
        assert!(out[1..].iter().all(|l| l.kind == LineKind::OutputCard));
    }

    #[test]
    fn activities_are_bulleted() {
        assert_eq!(
            texts(&run("activities")),
            vec!["- Riding", "- Music", "- Gambling"]
        );
    }

    #[test]
    fn contact_lists_four_fields() {
        assert_eq!(
            texts(&run("contact")),
            vec![
                "Email: ada@example.com",
                "Phone: +44 1",
                "LinkedIn: linkedin.com/ada",
                "Portfolio: ada.dev"
            ]
        );
    }

    #[test]
    fn empty_lists_project_to_empty_output() {
        let p = ProfileRecord::from_json(r#"{ "personal": { "name": "Nobody" } }"#).unwrap();
        let reg = registry();
        let env = Environment::with_profile(&p);
        for cmd in ["education", "experience", "activities"] {
            assert!(reg.interpret(cmd, &env).into_lines().is_empty(), "{cmd}");
        }
        assert_eq!(reg.interpret("projects", &env).into_lines().len(), 1);
    }

    #[test]
    fn every_section_is_registered() {
        let reg = registry();
        for name in SECTION_COMMANDS {
            assert!(reg.contains(name), "{name}");
        }
    }

    #[test]
    fn section_commands_are_idempotent() {
        let p = sample();
        let reg = registry();
        let env = Environment::with_profile(&p);
        for name in SECTION_COMMANDS {
            assert_eq!(reg.interpret(name, &env), reg.interpret(name, &env), "{name}");
        }
    }
}
