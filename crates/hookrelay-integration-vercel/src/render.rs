//! Rendering a normalized event into a Mattermost message

use hookrelay::domain::services::{
    format_duration_ms, iso8601, render_datetime, take_chars, title_case, truncate_chars,
};
use hookrelay::{Action, Attachment, DateStyle, Field, MattermostMessage};

use crate::event::VercelEvent;
use crate::presentation::{presentation_for, Presentation};

pub const VERCEL_USERNAME: &str = "Vercel";
pub const VERCEL_ICON_URL: &str =
    "https://assets.vercel.com/image/upload/v1588805858/repositories/vercel/logo.png";

pub const FIELD_PROJECT: &str = ":file_folder: Project";
pub const FIELD_ENVIRONMENT: &str = ":earth_americas: Environment";
pub const FIELD_LIVE_URL: &str = ":globe_with_meridians: Live URL";
pub const FIELD_BRANCH: &str = ":herb: Branch";
pub const FIELD_AUTHOR: &str = ":bust_in_silhouette: Author";
pub const FIELD_COMMIT: &str = ":bookmark: Commit";
pub const FIELD_MESSAGE: &str = ":speech_balloon: Message";
pub const FIELD_REPOSITORY: &str = ":package: Repository";
pub const FIELD_SOURCE: &str = ":inbox_tray: Source";
pub const FIELD_TEAM: &str = ":busts_in_silhouette: Team";
pub const FIELD_USER: &str = ":bust_in_silhouette: User";
pub const FIELD_CREATED: &str = ":calendar: Created";
pub const FIELD_BUILD_TIME: &str = ":stopwatch: Build Time";
pub const FIELD_REGIONS: &str = ":world_map: Regions";
pub const FIELD_EVENT: &str = ":label: Event";
pub const FIELD_REGION: &str = ":round_pushpin: Region";

const SHORT_SHA_LEN: usize = 7;
const FIELD_MESSAGE_MAX: usize = 200;
const TEXT_MESSAGE_MAX: usize = 100;

/// Render a normalized event
pub fn render_event(event: &VercelEvent) -> MattermostMessage {
    let presentation = presentation_for(&event.event_type);

    let mut message = MattermostMessage::new()
        .with_text(summary_text(event, &presentation))
        .with_username(VERCEL_USERNAME)
        .with_icon_url(VERCEL_ICON_URL);
    message.push_attachment(build_attachment(event, &presentation));
    message
}

/// Top-level notification text
fn summary_text(event: &VercelEvent, presentation: &Presentation) -> String {
    let mut text = format!("{} {}", presentation.emoji, presentation.title);

    if let Some(project) = event.project_name() {
        text.push_str(&format!(" for {}", project));
    }
    if let Some(target) = event.target() {
        text.push_str(&format!(" ({})", title_case(target)));
    }
    if let Some(url) = event.live_url() {
        text.push_str(&format!(" - https://{}", url));
    }

    let meta = event.meta();
    if let Some(commit_message) = meta.and_then(|m| m.commit_message()) {
        text.push_str(&format!(
            "\n> {}",
            truncate_chars(commit_message, TEXT_MESSAGE_MAX)
        ));
    }
    if let Some(author) = meta.and_then(|m| m.author()) {
        text.push_str(&format!(" by {}", author));
    }

    if text.trim().is_empty() {
        return format!(
            "{} Vercel {}: {}",
            presentation.emoji, presentation.title, event.event_type
        );
    }
    text
}

fn build_attachment(event: &VercelEvent, presentation: &Presentation) -> Attachment {
    let fallback = match event.project_name() {
        Some(project) => format!("{} for {}", presentation.title, project),
        None => presentation.title.to_string(),
    };

    let mut attachment = Attachment {
        fallback: Some(fallback),
        color: Some(presentation.color.to_string()),
        title: Some(format!("{} {}", presentation.emoji, presentation.title)),
        title_link: event.details_url().map(str::to_string),
        text: event.deployment().and_then(|d| d.error_message.clone()),
        footer: Some(VERCEL_USERNAME.to_string()),
        footer_icon: Some(VERCEL_ICON_URL.to_string()),
        timestamp: Some(iso8601(&event.created_at)),
        ..Default::default()
    };

    for field in build_fields(event) {
        attachment.push_field(field);
    }
    for action in build_actions(event) {
        attachment.push_action(action);
    }

    attachment
}

/// Attachment fields, in display order; absent data produces no field
pub fn build_fields(event: &VercelEvent) -> Vec<Field> {
    let mut fields = Vec::new();
    let deployment = event.deployment();
    let meta = event.meta();
    let repository = meta.and_then(|m| m.repository());

    if let Some(project) = event.project_name() {
        fields.push(Field::new(FIELD_PROJECT, project, true));
    }
    if let Some(target) = event.target() {
        fields.push(Field::new(FIELD_ENVIRONMENT, title_case(target), true));
    }
    if let Some(url) = event.live_url() {
        fields.push(Field::new(
            FIELD_LIVE_URL,
            format!("[{}](https://{})", url, url),
            false,
        ));
    }

    if let Some(meta) = meta {
        if let Some(branch) = meta.branch() {
            fields.push(Field::new(FIELD_BRANCH, branch, true));
        }
        if let Some(author) = meta.author() {
            fields.push(Field::new(FIELD_AUTHOR, author, true));
        }
        if let Some((provider, sha)) = meta.commit_sha() {
            let short = format!("`{}`", take_chars(sha, SHORT_SHA_LEN));
            let value = match meta.repository_on(provider) {
                Some(repo) => format!("[{}]({})", short, repo.commit_url(sha)),
                None => short,
            };
            fields.push(Field::new(FIELD_COMMIT, value, true));
        }
        if let Some(commit_message) = meta.commit_message() {
            fields.push(Field::new(
                FIELD_MESSAGE,
                truncate_chars(commit_message, FIELD_MESSAGE_MAX),
                false,
            ));
        }
    }

    if let Some(repo) = &repository {
        fields.push(Field::new(
            FIELD_REPOSITORY,
            format!("[{}]({})", repo.slug(), repo.url()),
            true,
        ));
    }
    if let Some(source) = deployment.and_then(|d| d.source.as_deref()) {
        fields.push(Field::new(FIELD_SOURCE, source.to_uppercase(), true));
    }

    let team = event
        .payload
        .team
        .as_ref()
        .and_then(|t| t.name.as_deref().or(t.slug.as_deref()));
    let user = event
        .payload
        .user
        .as_ref()
        .and_then(|u| u.name.as_deref().or(u.username.as_deref()));
    match (team, user) {
        (Some(team), _) => fields.push(Field::new(FIELD_TEAM, team, true)),
        (None, Some(user)) => fields.push(Field::new(FIELD_USER, user, true)),
        (None, None) => {}
    }

    fields.push(Field::new(
        FIELD_CREATED,
        format!(
            "{} UTC",
            render_datetime(&event.created_at, DateStyle::ShortDateTime)
        ),
        true,
    ));

    if let Some(elapsed) = event.build_duration_ms() {
        fields.push(Field::new(FIELD_BUILD_TIME, format_duration_ms(elapsed), true));
    }
    if let Some(regions) = event.payload.regions.as_ref().filter(|r| !r.is_empty()) {
        fields.push(Field::new(
            FIELD_REGIONS,
            regions.join(", ").to_uppercase(),
            true,
        ));
    }

    fields.push(Field::new(FIELD_EVENT, event.event_type.as_str(), true));

    if let Some(region) = event.payload.region.as_deref() {
        fields.push(Field::new(FIELD_REGION, region, true));
    }

    fields
}

/// Link buttons under the attachment
pub fn build_actions(event: &VercelEvent) -> Vec<Action> {
    let mut actions = Vec::new();

    if let Some(url) = event.live_url() {
        actions.push(Action::button("Visit Site", format!("https://{}", url)).with_style("primary"));
    }
    if let Some(url) = event.details_url() {
        let action = if event.is_error() {
            Action::button("View Error Details", url).with_style("danger")
        } else {
            Action::button("View Details", url)
        };
        actions.push(action);
    }
    if let Some(url) = event.project_url() {
        actions.push(Action::button("Project Dashboard", url));
    }
    if let Some(repo) = event.meta().and_then(|m| m.repository()) {
        actions.push(Action::button("View Repository", repo.url()));
    }

    actions
}
