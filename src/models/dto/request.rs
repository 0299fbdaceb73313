use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Turn, TurnRole};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TurnRequestDto {
    pub role: TurnRole,

    #[validate(length(min = 1, message = "Message content cannot be empty"))]
    pub content: String,
}

impl From<TurnRequestDto> for Turn {
    fn from(dto: TurnRequestDto) -> Self {
        Turn {
            role: dto.role,
            content: dto.content,
        }
    }
}

/// Full conversation replayed by the caller on every request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequestDto {
    #[validate(length(max = 64))]
    pub persona: String,

    #[validate(length(min = 1, message = "At least one message is required"), nested)]
    pub messages: Vec<TurnRequestDto>,
}

impl ChatRequestDto {
    pub fn into_turns(self) -> Vec<Turn> {
        self.messages.into_iter().map(Turn::from).collect()
    }
}
