//! Response-and-emotion generation for the disaster helpline
//!
//! Produces a reply and an emotion label for a caller's message via two
//! sequential chat completion calls. The calls are independent provider
//! round-trips with no shared context; the emotion call is not issued until
//! the reply call has completed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::llm::ChatClient;
use crate::Result;

/// System instruction for the reply call
const RESPONSE_SYSTEM_PROMPT: &str = "You are an AI assistant working in a real-time emergency disaster response call center based in Kerala, India. You are the official emergency helpline, so never ask the caller to contact police, fire, ambulance, or dial 911. You must give clear and calm safety instructions, ask immediate follow-up questions, and reassure the person in crisis. Use simple, Indian English. Always assume you're the first point of help. Ask for their current location, if they are in immediate danger, and if others are with them. Never redirect to any other services - you are the official emergency contact.";

/// System instruction for the emotion classification call
const EMOTION_SYSTEM_PROMPT: &str = "You are an AI that detects the emotion of a person calling a Kerala-based disaster helpline. Return the dominant emotion in **one word only** from this list: calm, confused, urgent, panicked, scared, distressed, angry, hopeless, sad, uncertain.";

/// Closed vocabulary the emotion classifier is instructed to use.
///
/// Constrained by prompt instruction only; the reply is not validated
/// against this list.
pub const EMOTIONS: [&str; 10] = [
    "calm",
    "confused",
    "urgent",
    "panicked",
    "scared",
    "distressed",
    "angry",
    "hopeless",
    "sad",
    "uncertain",
];

/// Reply and emotion label for one caller message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseAndEmotion {
    pub response_text: String,
    pub emotion: String,
}

/// Generate a helpline reply and classify the caller's emotion.
///
/// Strict ordering: the reply call first, then the emotion call. The
/// operation is all-or-nothing; if either call fails the whole operation
/// fails and a successful reply from the first call is discarded. Each call
/// is attempted exactly once.
pub async fn generate_response_and_emotion(
    client: &ChatClient,
    input_text: &str,
) -> Result<ResponseAndEmotion> {
    let response_text = client
        .complete(
            RESPONSE_SYSTEM_PROMPT,
            &format!(
                "A caller said: '{}'. Give a response as an empathetic Kerala-based emergency helpline agent.",
                input_text
            ),
        )
        .await?;

    debug!("Generated helpline response ({} chars)", response_text.len());

    let emotion = client
        .complete(
            EMOTION_SYSTEM_PROMPT,
            &format!(
                "Identify the dominant emotion in this caller's message: '{}'",
                input_text
            ),
        )
        .await?
        .to_lowercase();

    info!("Detected emotion: {}", emotion);

    Ok(ResponseAndEmotion {
        response_text,
        emotion,
    })
}
