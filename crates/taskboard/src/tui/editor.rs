use taskboard_app::TaskDraft;
use taskboard_core::Task;

const DESCRIPTION_SEPARATOR: &str = "---";

pub(super) fn new_task_editor_template() -> String {
    [
        "# Create a new task. Title and due date (YYYY-MM-DD) are required.",
        "# Everything below the --- line is the description, kept as written.",
        "# Save an empty file to cancel.",
        "title: ",
        "due: ",
        DESCRIPTION_SEPARATOR,
        "",
    ]
    .join("\n")
}

pub(super) fn edit_task_editor_template(task: &Task) -> String {
    format!(
        "# Editing task {}. Title and due date (YYYY-MM-DD) are required.\n\
         # Everything below the --- line is the description, kept as written.\n\
         title: {}\n\
         due: {}\n\
         {DESCRIPTION_SEPARATOR}\n\
         {}\n",
        task.id, task.title, task.due_date, task.description,
    )
}

/// Split editor output at the first `---` line.
///
/// The description is everything after it, minus the single newline the
/// editor leaves at the end of the file.
fn split_description(raw: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in raw.split_inclusive('\n') {
        let end = offset + line.len();
        if line.trim() == DESCRIPTION_SEPARATOR {
            let body = &raw[end..];
            let body = body
                .strip_suffix("\r\n")
                .or_else(|| body.strip_suffix('\n'))
                .unwrap_or(body);
            return (&raw[..offset], body);
        }
        offset = end;
    }
    (raw, "")
}

/// Parse editor output into a draft.
///
/// `Ok(None)` means every field was left empty and the edit is cancelled.
/// Field validation (required title, date format) is left to the service.
pub(super) fn parse_task_editor_output(raw: &str) -> Result<Option<TaskDraft>, String> {
    let (header, description) = split_description(raw);
    let mut title: Option<&str> = None;
    let mut due: Option<&str> = None;

    for line in header.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(format!("Malformed line: {trimmed}"));
        };
        match key.trim() {
            // Only the space after the colon is syntax; the rest is the title.
            "title" => title = Some(value.strip_prefix(' ').unwrap_or(value).trim_end_matches('\r')),
            "due" | "due_date" | "dueDate" => due = Some(value.trim()),
            unknown => return Err(format!("Unknown field: {unknown}")),
        }
    }

    let title = title.unwrap_or_default();
    let due = due.unwrap_or_default();

    if title.is_empty() && due.is_empty() && description.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(TaskDraft {
        title: title.to_owned(),
        description: description.to_owned(),
        due_date: due.to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::{DueDate, TaskId};

    fn parsed(raw: &str) -> Option<TaskDraft> {
        parse_task_editor_output(raw).unwrap_or_else(|err| panic!("must parse: {err}"))
    }

    #[test]
    fn untouched_new_template_cancels() {
        assert_eq!(parsed(&new_task_editor_template()), None);
    }

    #[test]
    fn filled_template_becomes_draft() {
        let raw = "title: Write spec\ndue: 2024-01-01\n---\nFirst line\n\nSecond line\n";
        let draft = parsed(raw).unwrap_or_else(|| panic!("draft expected"));
        assert_eq!(draft.title, "Write spec");
        assert_eq!(draft.due_date, "2024-01-01");
        assert_eq!(draft.description, "First line\n\nSecond line");
    }

    #[test]
    fn title_may_contain_colons() {
        let draft = parsed("title: Meeting: 10:00\ndue: 2024-01-01\n").unwrap_or_else(|| panic!("draft expected"));
        assert_eq!(draft.title, "Meeting: 10:00");
    }

    #[test]
    fn missing_title_is_left_for_validation() {
        let draft = parsed("title:\ndue: 2024-01-01\n").unwrap_or_else(|| panic!("draft expected"));
        assert!(draft.title.is_empty());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn unknown_fields_and_malformed_lines_are_rejected() {
        assert_eq!(
            parse_task_editor_output("title: x\npriority: high\n"),
            Err("Unknown field: priority".to_string())
        );
        assert_eq!(
            parse_task_editor_output("just some words\n"),
            Err("Malformed line: just some words".to_string())
        );
    }

    #[test]
    fn edit_template_round_trips_task() {
        let mut task = Task::new(TaskId::from("7"), "Ship it", "Line one\nLine two", DueDate::new("2030-01-02"));
        task.completed = true;

        let draft = parsed(&edit_task_editor_template(&task)).unwrap_or_else(|| panic!("draft expected"));
        assert_eq!(draft, TaskDraft::from_task(&task));
    }

    #[test]
    fn description_headings_and_indentation_survive_untouched_edit() {
        for description in ["# Steps\n  indented", "  leading\n\n", "", "trailing newline\n", "---\nafter"] {
            let task = Task::new(TaskId::from("7"), "Ship", description, DueDate::new("2030-01-02"));
            let draft = parsed(&edit_task_editor_template(&task)).unwrap_or_else(|| panic!("draft expected"));
            assert_eq!(draft.description, description);
        }
    }

    #[test]
    fn padded_titles_survive_untouched_edit() {
        let task = Task::new(TaskId::from("7"), "  Ship  ", "", DueDate::new("2030-01-02"));
        let draft = parsed(&edit_task_editor_template(&task)).unwrap_or_else(|| panic!("draft expected"));
        assert_eq!(draft.title, "  Ship  ");
    }

    #[test]
    fn comments_are_only_skipped_above_separator() {
        let draft = parsed("# note\ntitle: x\ndue: 2024-01-01\n---\n# Heading\nbody\n")
            .unwrap_or_else(|| panic!("draft expected"));
        assert_eq!(draft.description, "# Heading\nbody");
    }
}
