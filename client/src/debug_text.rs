//! On-screen debug messages
//!
//! Short-lived text lines in the top-left corner, newest first. Every message
//! is also written to the log.

use bevy::prelude::*;
use std::collections::VecDeque;

/// How long a message stays on screen (seconds)
pub const DEFAULT_MESSAGE_SECONDS: f32 = 5.0;

/// Oldest messages are dropped past this count
const MAX_MESSAGES: usize = 8;

pub struct ScreenMessagesPlugin;

impl Plugin for ScreenMessagesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenMessages>();
        app.add_systems(Startup, spawn_message_panel);
        app.add_systems(Update, (expire_messages, update_message_panel).chain());
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ScreenMessage {
    text: String,
    remaining: f32,
}

/// Queue of timed on-screen messages
#[derive(Resource, Debug, Default)]
pub struct ScreenMessages {
    messages: VecDeque<ScreenMessage>,
}

impl ScreenMessages {
    pub fn push(&mut self, text: impl Into<String>) {
        self.push_for(text, DEFAULT_MESSAGE_SECONDS);
    }

    pub fn push_for(&mut self, text: impl Into<String>, seconds: f32) {
        let text = text.into();
        info!("{}", text);
        self.messages.push_front(ScreenMessage {
            text,
            remaining: seconds,
        });
        self.messages.truncate(MAX_MESSAGES);
    }

    /// Age every message by `dt` and drop the expired ones.
    pub fn tick(&mut self, dt: f32) {
        for message in self.messages.iter_mut() {
            message.remaining -= dt;
        }
        self.messages.retain(|message| message.remaining > 0.0);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Newest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|message| message.text.as_str())
    }
}

/// Marker for the message overlay text
#[derive(Component)]
pub struct ScreenMessagePanel;

fn spawn_message_panel(mut commands: Commands) {
    commands.spawn((
        ScreenMessagePanel,
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.3, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));
}

fn expire_messages(time: Res<Time>, mut messages: ResMut<ScreenMessages>) {
    messages.tick(time.delta_secs());
}

fn update_message_panel(
    messages: Res<ScreenMessages>,
    mut panel: Query<&mut Text, With<ScreenMessagePanel>>,
) {
    if !messages.is_changed() {
        return;
    }
    let Ok(mut text) = panel.single_mut() else {
        return;
    };
    **text = messages.lines().collect::<Vec<_>>().join("\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_expire() {
        let mut messages = ScreenMessages::default();
        messages.push("x key pressed");
        messages.push_for("short", 1.0);

        messages.tick(1.5);
        assert_eq!(messages.lines().collect::<Vec<_>>(), vec!["x key pressed"]);

        messages.tick(4.0);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_newest_first_and_capped() {
        let mut messages = ScreenMessages::default();
        for i in 0..20 {
            messages.push(format!("message {i}"));
        }
        assert_eq!(messages.len(), MAX_MESSAGES);
        assert_eq!(messages.lines().next(), Some("message 19"));
    }
}
