//! Conversation scenarios: which agents take part and how turns are routed.

use std::fmt;
use std::str::FromStr;

use retail_agents_core::{CoreError, TABLE_DEFINITIONS_CAP_REF, add_cap_ref, fulfill_request_prompt};
use retail_agents_storage::{SchemaStore, StorageError};

use crate::role::AgentRole;

/// How the next speaker is chosen after each message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerSelection {
    /// The model picks the next speaker from the agents' descriptions.
    Auto,
    /// Participants speak in fixed order.
    RoundRobin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    /// Product recommendation, purchase and order status over the retail tables.
    #[default]
    Retail,
    /// Damaged package and defective product triage from images.
    ShippingStatus,
    /// Invoice OCR checked against the stored order total.
    OrderVerification,
}

impl Scenario {
    pub const ALL: &'static [Self] = &[Self::Retail, Self::ShippingStatus, Self::OrderVerification];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::ShippingStatus => "shipping_status",
            Self::OrderVerification => "order_verification",
        }
    }

    #[must_use]
    pub const fn roles(self) -> &'static [AgentRole] {
        match self {
            Self::Retail => &[AgentRole::ProductRecommendation, AgentRole::OrderStatus],
            Self::ShippingStatus => &[
                AgentRole::DamageDefectStatus,
                AgentRole::ImageExplainer,
                AgentRole::PackageShippingStatus,
                AgentRole::ProductShippingStatus,
            ],
            Self::OrderVerification => {
                &[AgentRole::OcrExtraction, AgentRole::DbRetrieval, AgentRole::OrderVerification]
            },
        }
    }

    /// Upper bound on messages in one conversation, the opening message included.
    #[must_use]
    pub const fn max_round(self) -> usize {
        match self {
            Self::Retail => 30,
            Self::ShippingStatus => 50,
            Self::OrderVerification => 5,
        }
    }

    #[must_use]
    pub const fn speaker_selection(self) -> SpeakerSelection {
        match self {
            Self::Retail | Self::ShippingStatus => SpeakerSelection::Auto,
            Self::OrderVerification => SpeakerSelection::RoundRobin,
        }
    }

    /// Caption images found in messages.
    #[must_use]
    pub const fn vision(self) -> bool {
        !matches!(self, Self::Retail)
    }

    /// Append the public table definitions to the opening prompt.
    #[must_use]
    pub const fn injects_table_definitions(self) -> bool {
        matches!(self, Self::Retail)
    }

    /// Instructions for the user proxy, shown to the speaker selector.
    #[must_use]
    pub const fn user_proxy_message(self) -> &'static str {
        match self {
            Self::Retail => {
                "You are the admin overseeing the chat. Continue interacting with the respective agent until request is fulfilled."
            },
            Self::ShippingStatus => {
                "You are the admin overseeing the chat. Continue interacting with the respective agent until request is fulfilled. \
If you have the description of the image from 'image_explainer' agent then forward it to particular agent for further analysis. \
If it is related to product defect then go to 'product_shipping_status_agent' and if it is related to package damage then go to 'package_shipping_status_agent' agent. \
If you have the final decision then provide it to the user."
            },
            Self::OrderVerification => {
                "Your role is to coordinate the workflow by directing tasks to the appropriate agents to process the image, retrieve data, and classify the order. \
First the OCR Extraction Agent extracts the Order ID and Billed Price, then the Database Retrieval Agent fetches the Total Price for that Order ID, \
then the Order Verification Agent classifies the order."
            },
        }
    }

    /// Opening message for a conversation started from `user_input`.
    ///
    /// # Errors
    /// Returns an error if the table definitions cannot be read.
    pub async fn opening_prompt<S>(self, store: &S, user_input: &str) -> Result<String, StorageError>
    where
        S: SchemaStore + ?Sized,
    {
        let prompt = fulfill_request_prompt(user_input);
        if !self.injects_table_definitions() {
            return Ok(prompt);
        }
        let definitions = store.get_table_definitions_for_prompt().await?;
        Ok(add_cap_ref(
            &prompt,
            &format!("Use these {TABLE_DEFINITIONS_CAP_REF} to satisfy the database query."),
            TABLE_DEFINITIONS_CAP_REF,
            &definitions,
        ))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|scenario| scenario.as_str() == normalized)
            .ok_or_else(|| CoreError::InvalidScenario(s.to_owned()))
    }
}
