//! Placeholder substitution for reward commands.
//!
//! Substitution is literal string replacement, applied token by token in
//! the order of [`PLACEHOLDERS`]. It is not a template language: there is
//! no escaping and unknown `{...}` tokens are left as they are.

use killawards_types::{ActorId, Position};

/// Tokens replaced in command templates, in replacement order.
pub const PLACEHOLDERS: [&str; 6] = [
    "{PlayerId}",
    "{PlayerName}",
    "{PositionX}",
    "{PositionY}",
    "{PositionZ}",
    "{Grid}",
];

/// Values substituted into a command template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateContext<'a> {
    /// The rewarded actor.
    pub actor: ActorId,
    /// The actor's display name.
    pub name: &'a str,
    /// The actor's position at dispatch time.
    pub position: Position,
    /// The map grid cell containing `position`.
    pub grid: &'a str,
}

/// Fill in every placeholder in `template`.
pub fn render(template: &str, context: &TemplateContext<'_>) -> String {
    template
        .replace("{PlayerId}", &context.actor.to_string())
        .replace("{PlayerName}", context.name)
        .replace("{PositionX}", &context.position.x.to_string())
        .replace("{PositionY}", &context.position.y.to_string())
        .replace("{PositionZ}", &context.position.z.to_string())
        .replace("{Grid}", context.grid)
}

/// Whether `template` contains any token from [`PLACEHOLDERS`].
pub fn has_placeholders(template: &str) -> bool {
    PLACEHOLDERS.iter().any(|token| template.contains(token))
}

/// Wrap text so the actor's client says it in chat.
pub fn chat_command(text: &str) -> String {
    format!("chat.say \"{text}\"")
}
