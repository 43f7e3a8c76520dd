//! CLI output formatting for check and render results.
//!
//! Output is information-centric, not file-centric: the primary display for
//! every entity is its semantic identity (post number, person name), with
//! filesystem paths shown as indented `Source:` context lines.
//!
//! ```text
//! Post 1 → output/Post1.jpg (2 people)
//!     001 Alice Raj
//!         Source: photos/alice.jpg
//!     002 Bo Chen
//!         Source: photos/bo.jpg
//!
//! Wrote 1 post
//! ```
//!
//! Each mode has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::input::Person;
use std::path::PathBuf;

fn people_count(n: usize) -> String {
    if n == 1 {
        "1 person".to_string()
    } else {
        format!("{n} people")
    }
}

/// Format the result of validating an input file.
pub fn format_check_output(people: &[Person]) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, person) in people.iter().enumerate() {
        lines.push(format!("{:03} {}", index + 1, person.name));
        lines.push(format!("    Source: {}", person.image_path.display()));
        if let Some(dob) = person.dob {
            lines.push(format!("    Birthday: {dob}"));
        }
    }
    lines.push(String::new());
    lines.push(format!("{} valid", people_count(people.len())));
    lines
}

/// Format the result of a render run: one block per written post.
///
/// `batches` and `paths` are parallel — batch `i` was rendered to
/// `paths[i]`.
pub fn format_render_output(batches: &[&[Person]], paths: &[PathBuf]) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, (batch, path)) in batches.iter().zip(paths).enumerate() {
        lines.push(format!(
            "Post {} → {} ({})",
            index + 1,
            path.display(),
            people_count(batch.len())
        ));
        for (person_index, person) in batch.iter().enumerate() {
            lines.push(format!("    {:03} {}", person_index + 1, person.name));
            lines.push(format!("        Source: {}", person.image_path.display()));
        }
    }
    lines.push(String::new());
    let posts = paths.len();
    lines.push(if posts == 1 {
        "Wrote 1 post".to_string()
    } else {
        format!("Wrote {posts} posts")
    });
    lines
}

pub fn print_check_output(people: &[Person]) {
    for line in format_check_output(people) {
        println!("{line}");
    }
}

pub fn print_render_output(batches: &[&[Person]], paths: &[PathBuf]) {
    for line in format_render_output(batches, paths) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::person;
    use chrono::NaiveDate;

    #[test]
    fn check_output_lists_people_with_sources() {
        let people = vec![person("Alice Raj", "photos/alice.jpg")];
        let lines = format_check_output(&people);
        assert_eq!(lines[0], "001 Alice Raj");
        assert_eq!(lines[1], "    Source: photos/alice.jpg");
        assert_eq!(lines.last().unwrap(), "1 person valid");
    }

    #[test]
    fn check_output_includes_birthday_when_present() {
        let mut p = person("Alice", "a.jpg");
        p.dob = NaiveDate::from_ymd_opt(1994, 8, 6);
        let lines = format_check_output(&[p]);
        assert!(lines.contains(&"    Birthday: 1994-08-06".to_string()));
    }

    #[test]
    fn render_output_groups_by_post() {
        let people: Vec<Person> = (0..7)
            .map(|i| person(&format!("P{i}"), &format!("{i}.jpg")))
            .collect();
        let batches: Vec<&[Person]> = vec![&people[..5], &people[5..]];
        let paths = vec![PathBuf::from("output/Post1.jpg"), PathBuf::from("output/Post2.jpg")];

        let lines = format_render_output(&batches, &paths);
        assert_eq!(lines[0], "Post 1 → output/Post1.jpg (5 people)");
        assert!(lines.contains(&"Post 2 → output/Post2.jpg (2 people)".to_string()));
        assert_eq!(lines.last().unwrap(), "Wrote 2 posts");
    }

    #[test]
    fn render_output_singular_post() {
        let people = vec![person("Solo", "s.jpg")];
        let batches: Vec<&[Person]> = vec![&people[..]];
        let paths = vec![PathBuf::from("output/Post1.jpg")];

        let lines = format_render_output(&batches, &paths);
        assert_eq!(lines[0], "Post 1 → output/Post1.jpg (1 person)");
        assert_eq!(lines.last().unwrap(), "Wrote 1 post");
    }

    #[test]
    fn empty_render_output() {
        let lines = format_render_output(&[], &[]);
        assert_eq!(lines.last().unwrap(), "Wrote 0 posts");
    }
}
