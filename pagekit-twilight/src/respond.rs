//! Interaction responses and message edits performed for paginator sessions.

use twilight_http::Client;
use twilight_model::{
    application::interaction::Interaction,
    channel::{
        Message,
        message::{MessageFlags, component::Component},
    },
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use crate::content::MessagePayload;

/// Shown when someone other than the session owner presses a control.
pub const PAGINATION_WRONG_USER_MESSAGE: &str = "This pagination session belongs to another user.";
/// Shown when a control outlives its session.
pub const PAGINATION_EXPIRED_MESSAGE: &str =
    "This pagination session expired. Run the command again.";
/// Shown when a control cannot be decoded or is not part of the session.
pub const PAGINATION_INVALID_MESSAGE: &str = "Invalid pagination interaction.";

fn payload_data(payload: &MessagePayload) -> InteractionResponseData {
    InteractionResponseDataBuilder::new()
        .content(payload.content.clone().unwrap_or_default())
        .embeds(payload.embeds.clone())
        .components(payload.components.clone())
        .build()
}

async fn create_response(
    http: &Client,
    interaction: &Interaction,
    response: &InteractionResponse,
) -> anyhow::Result<()> {
    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, response)
        .await?;

    Ok(())
}

/// Replace the paginator message in place.
pub async fn respond_update_message(
    http: &Client,
    interaction: &Interaction,
    payload: &MessagePayload,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::UpdateMessage,
        data: Some(payload_data(payload)),
    };

    create_response(http, interaction, &response).await
}

/// Replace only the components of the paginator message.
pub async fn respond_update_components(
    http: &Client,
    interaction: &Interaction,
    components: &[Component],
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::UpdateMessage,
        data: Some(
            InteractionResponseDataBuilder::new()
                .components(components.to_vec())
                .build(),
        ),
    };

    create_response(http, interaction, &response).await
}

/// Acknowledge a component press without changing the message.
pub async fn respond_deferred_update(
    http: &Client,
    interaction: &Interaction,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::DeferredUpdateMessage,
        data: None,
    };

    create_response(http, interaction, &response).await
}

/// Reply with a message only the actor can see.
pub async fn respond_ephemeral_message(
    http: &Client,
    interaction: &Interaction,
    content: &str,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(content)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    create_response(http, interaction, &response).await
}

/// Tell the actor the session behind this control has ended.
pub async fn respond_expired(http: &Client, interaction: &Interaction) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, PAGINATION_EXPIRED_MESSAGE).await
}

/// Tell the actor the control could not be understood.
pub async fn respond_invalid(http: &Client, interaction: &Interaction) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, PAGINATION_INVALID_MESSAGE).await
}

/// Open a modal built by the caller.
pub async fn respond_modal(
    http: &Client,
    interaction: &Interaction,
    data: InteractionResponseData,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::Modal,
        data: Some(data),
    };

    create_response(http, interaction, &response).await
}

/// Answer an interaction with a new paginator message and return it.
pub async fn respond_with_message(
    http: &Client,
    interaction: &Interaction,
    payload: &MessagePayload,
) -> anyhow::Result<Message> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(payload_data(payload)),
    };

    create_response(http, interaction, &response).await?;

    let message = http
        .interaction(interaction.application_id)
        .response(&interaction.token)
        .await?
        .model()
        .await?;

    Ok(message)
}

/// Post a new paginator message to a channel.
pub async fn send_message(
    http: &Client,
    channel_id: Id<ChannelMarker>,
    payload: &MessagePayload,
) -> anyhow::Result<Message> {
    let mut request = http
        .create_message(channel_id)
        .embeds(&payload.embeds)
        .components(&payload.components);

    if let Some(content) = payload.content.as_deref() {
        request = request.content(content);
    }

    Ok(request.await?.model().await?)
}

/// Swap the components of an existing message, leaving its content alone.
pub async fn edit_components(
    http: &Client,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    components: &[Component],
) -> anyhow::Result<()> {
    http.update_message(channel_id, message_id)
        .components(Some(components))
        .await?;

    Ok(())
}

/// Redraw an existing paginator message outside of an interaction.
pub async fn edit_message(
    http: &Client,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    payload: &MessagePayload,
) -> anyhow::Result<()> {
    http.update_message(channel_id, message_id)
        .content(payload.content.as_deref())
        .embeds(Some(payload.embeds.as_slice()))
        .components(Some(payload.components.as_slice()))
        .await?;

    Ok(())
}

/// Remove the paginator message.
pub async fn delete_message(
    http: &Client,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
) -> anyhow::Result<()> {
    http.delete_message(channel_id, message_id).await?;

    Ok(())
}
