use super::task::VerificationTask;

pub const VERIFIER_SYSTEM_PROMPT: &str = "You are an automated verifier.";

pub const TASK_FETCH_FAILED: &str = "Something went wrong while fetching tasks.";

pub const CHAT_FAILED: &str = "Something went wrong";

const VERIFIER_BRIEF: &str = "\
You are an automated verifier tasked with assessing a submitter's claimed skillsets based on their provided submission, which may include links (e.g., to a Figma file) and other resources. Given a specific submission and a list of skillsets to test, your responsibilities are as follows:

1. Generate a series of tasks that the submitter must complete. Each task should be directly related to the submission and designed to thoroughly evaluate the corresponding claimed skillsets.
2. Ensure that the combined set of tasks comprehensively covers all the claimed skillsets.
3. Maintain the overall conversation context even if the submitter engages in additional dialogue between tasks.";

/// User prompt for the initial task request.
pub fn compose_task_prompt<S: AsRef<str>>(file_link: &str, skills: &[S]) -> String {
    let skills = skills
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{VERIFIER_BRIEF}\n\nFigma file link: {file_link}\n\nSkillsets selected: {skills}\n")
}

/// Numbered markdown list: `N. **title**\ndescription`, blank line between.
pub fn render_task_list(tasks: &[VerificationTask]) -> String {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| format!("{}. **{}**\n{}", index + 1, task.title, task.description))
        .collect::<Vec<_>>()
        .join("\n\n")
}
