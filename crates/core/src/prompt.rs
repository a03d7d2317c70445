//! Prompt assembly helpers.

/// Builds the opening message of a conversation from the customer's request.
#[must_use]
pub fn fulfill_request_prompt(user_input: &str) -> String {
    format!("Fulfill this request: {user_input}. ")
}

/// Appends a labelled reference block to a prompt.
///
/// `prompt_suffix` should mention `cap_ref` so the model knows where to look;
/// the block itself follows under the `cap_ref` label.
#[must_use]
pub fn add_cap_ref(prompt: &str, prompt_suffix: &str, cap_ref: &str, cap_ref_content: &str) -> String {
    format!("{prompt} {prompt_suffix}\n\n{cap_ref}\n\n{cap_ref_content}")
}
