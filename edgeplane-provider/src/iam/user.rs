//! Account users
//!
//! Phone numbers are validated as `(###) ###-####` and stored in that form
//! whatever spelling the server returns. E-mail addresses are stored
//! lower-case and cannot be changed once the user exists.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;

use edgeplane_core::payload::{preserve_equivalent, to_json_string};
use edgeplane_core::provider::{ProviderError, ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::{ResourceData, Value};
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::{
    CreateUserRequest, GetUserRequest, RemoveUserRequest, UpdateUserAuthGrantsRequest, UpdateUserInfoRequest, User,
    UserBasicInfo,
};
use crate::meta::ProviderMeta;

const NAME: &str = "iam_user";

static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").unwrap());
static NON_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9]+").unwrap());

/// Error patterns and the hint appended to matching create/update failures
static ADVICE: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"\b(preferredLanguage|[pP]referred [lL]anguage)\b").unwrap(),
            r#"Tip: Check the supported values for "preferred_language""#,
        ),
        (
            Regex::new(r"\b(contactType|[cC]ontact [tT]ype)\b").unwrap(),
            r#"Tip: Check the supported values for "contact_type""#,
        ),
        (
            Regex::new(r"\b[cC]ountry\b").unwrap(),
            r#"Tip: Use the "iam_countries" data source to get possible values for "country""#,
        ),
        (
            Regex::new(r"\b(sessionTimeOut|[sS]ession [tT]ime ?[oO]ut)\b").unwrap(),
            r#"Tip: Check the supported values for "session_timeout""#,
        ),
        (
            Regex::new(r"\b[sS]tate\b").unwrap(),
            r#"Tip: Check the supported values for "state""#,
        ),
    ]
});

/// `(###) ###-####` when the input holds at least ten digits, else unchanged
fn canonical_phone(phone: &str) -> String {
    let digits = NON_DIGITS.replace_all(phone, "");
    if digits.len() < 10 {
        return phone.to_string();
    }
    format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
}

fn phone_number() -> AttributeType {
    AttributeType::Custom {
        name: "PhoneNumber".to_string(),
        base: Box::new(AttributeType::String),
        validate: |value| match value {
            Value::String(s) if s.is_empty() || PHONE.is_match(s) => Ok(()),
            _ => Err("Phone number must be in the form: (###) ###-####".to_string()),
        },
    }
}

fn auth_grants() -> AttributeType {
    AttributeType::Custom {
        name: "AuthGrants".to_string(),
        base: Box::new(AttributeType::Json),
        validate: |value| {
            let raw = value.as_str().unwrap_or_default();
            match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(serde_json::Value::Array(grants)) if !grants.is_empty() => Ok(()),
                _ => Err("Auth grants must be a non-empty JSON array".to_string()),
            }
        },
    }
}

#[derive(Debug, Error)]
#[error("{inner}\n{tip}")]
struct Advised {
    inner: Box<dyn std::error::Error + Send + Sync>,
    tip: &'static str,
}

/// Append the matching hint to an upstream failure
fn with_advice(err: ProviderError) -> ProviderError {
    match err {
        ProviderError::Upstream {
            object_type,
            operation,
            source,
        } => {
            let message = source.to_string();
            match ADVICE.iter().find(|(pattern, _)| pattern.is_match(&message)) {
                Some((_, tip)) => ProviderError::Upstream {
                    object_type,
                    operation,
                    source: Box::new(Advised { inner: source, tip: *tip }),
                },
                None => ProviderError::Upstream {
                    object_type,
                    operation,
                    source,
                },
            }
        }
        other => other,
    }
}

fn basic_info(data: &ResourceData) -> ProviderResult<UserBasicInfo> {
    Ok(UserBasicInfo {
        first_name: data.required_string("first_name")?,
        last_name: data.required_string("last_name")?,
        email: data.required_string("email")?,
        phone: data.required_string("phone")?,
        country: data.required_string("country")?,
        tfa_enabled: data.required_bool("enable_tfa")?,
        contact_type: data.optional_string("contact_type")?,
        job_title: data.optional_string("job_title")?,
        time_zone: data.optional_string("time_zone")?,
        secondary_email: data.optional_string("secondary_email")?,
        mobile_phone: data.optional_string("mobile_phone")?,
        address: data.optional_string("address")?,
        city: data.optional_string("city")?,
        state: data.optional_string("state")?,
        zip_code: data.optional_string("zip_code")?,
        preferred_language: data.optional_string("preferred_language")?,
        session_timeout: data.optional_int("session_timeout")?,
    })
}

fn grants(data: &ResourceData) -> ProviderResult<Vec<serde_json::Value>> {
    serde_json::from_value(data.required_json("auth_grants_json")?)
        .map_err(|e| ProviderError::configuration("auth_grants_json", e.to_string()))
}

/// True when a field the caller set differs from the stored user
fn basic_info_changed(desired: &UserBasicInfo, current: &UserBasicInfo) -> bool {
    fn differs<T: PartialEq>(want: &Option<T>, have: &Option<T>) -> bool {
        want.is_some() && want != have
    }
    let phone = |p: &Option<String>| p.as_deref().map(canonical_phone);

    desired.first_name != current.first_name
        || desired.last_name != current.last_name
        || canonical_phone(&desired.phone) != canonical_phone(&current.phone)
        || desired.country != current.country
        || desired.tfa_enabled != current.tfa_enabled
        || differs(&desired.contact_type, &current.contact_type)
        || differs(&desired.job_title, &current.job_title)
        || differs(&desired.time_zone, &current.time_zone)
        || differs(&desired.secondary_email, &current.secondary_email)
        || differs(&phone(&desired.mobile_phone), &phone(&current.mobile_phone))
        || differs(&desired.address, &current.address)
        || differs(&desired.city, &current.city)
        || differs(&desired.state, &current.state)
        || differs(&desired.zip_code, &current.zip_code)
        || differs(&desired.preferred_language, &current.preferred_language)
        || differs(&desired.session_timeout, &current.session_timeout)
}

pub struct UserResource;

impl UserResource {
    async fn fetch(&self, meta: &ProviderMeta, identity_id: &str) -> ProviderResult<User> {
        let api = meta.iam()?;
        meta.call(
            NAME,
            "GetUser",
            api.get_user(GetUserRequest {
                identity_id: identity_id.to_string(),
                auth_grants: true,
            }),
        )
        .await
    }
}

impl ResourceType for UserResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        let optional = |name: &str| AttributeSchema::new(name, AttributeType::String);
        ResourceSchema::new(NAME)
            .with_description("A user of the account")
            .attribute(AttributeSchema::new("first_name", types::not_blank()).required())
            .attribute(AttributeSchema::new("last_name", types::not_blank()).required())
            .attribute(AttributeSchema::new("email", types::not_blank()).required())
            .attribute(AttributeSchema::new("country", types::not_blank()).required())
            .attribute(AttributeSchema::new("phone", phone_number()).required())
            .attribute(AttributeSchema::new("enable_tfa", AttributeType::Bool).required())
            .attribute(
                AttributeSchema::new("auth_grants_json", auth_grants())
                    .required()
                    .with_description("Roles granted per group, as a JSON array"),
            )
            .attribute(optional("contact_type"))
            .attribute(optional("job_title"))
            .attribute(optional("time_zone"))
            .attribute(optional("secondary_email"))
            .attribute(AttributeSchema::new("mobile_phone", phone_number()))
            .attribute(optional("address"))
            .attribute(optional("city"))
            .attribute(optional("state"))
            .attribute(optional("zip_code"))
            .attribute(optional("preferred_language"))
            .attribute(AttributeSchema::new("session_timeout", AttributeType::Int))
            .attribute(AttributeSchema::new("user_name", AttributeType::String).computed())
            .attribute(AttributeSchema::new("is_locked", AttributeType::Bool).computed())
            .attribute(AttributeSchema::new("last_login", AttributeType::String).computed())
            .attribute(AttributeSchema::new("password_expired_after", AttributeType::String).computed())
            .attribute(AttributeSchema::new("tfa_configured", AttributeType::Bool).computed())
            .attribute(AttributeSchema::new("email_update_pending", AttributeType::Bool).computed())
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for UserResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let request = CreateUserRequest {
            basic: basic_info(data)?,
            auth_grants: grants(data)?,
            send_email: true,
        };
        let api = meta.iam()?;
        let user = meta
            .call(NAME, "CreateUser", api.create_user(request))
            .await
            .map_err(with_advice)?;
        log::info!("{}: created user {}", NAME, user.ui_identity_id);
        data.set_id(user.ui_identity_id);
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let identity_id = data.require_id()?.to_string();
        let user = self.fetch(meta, &identity_id).await?;
        let basic = user.basic;

        data.set("first_name", basic.first_name)?;
        data.set("last_name", basic.last_name)?;
        data.set("email", basic.email.to_lowercase())?;
        data.set("phone", canonical_phone(&basic.phone))?;
        data.set("country", basic.country)?;
        data.set("enable_tfa", basic.tfa_enabled)?;
        data.set_optional("contact_type", basic.contact_type)?;
        data.set_optional("job_title", basic.job_title)?;
        data.set_optional("time_zone", basic.time_zone)?;
        data.set_optional("secondary_email", basic.secondary_email)?;
        data.set_optional("mobile_phone", basic.mobile_phone.as_deref().map(canonical_phone))?;
        data.set_optional("address", basic.address)?;
        data.set_optional("city", basic.city)?;
        data.set_optional("state", basic.state)?;
        data.set_optional("zip_code", basic.zip_code)?;
        data.set_optional("preferred_language", basic.preferred_language)?;
        data.set_optional("session_timeout", basic.session_timeout)?;

        data.set("user_name", user.ui_user_name)?;
        data.set("is_locked", user.is_locked)?;
        data.set_optional("last_login", user.last_login_date)?;
        data.set_optional("password_expired_after", user.password_expiry_date)?;
        data.set("tfa_configured", user.tfa_configured)?;
        data.set("email_update_pending", user.email_update_pending)?;

        let current = data.optional_string("auth_grants_json")?;
        let fetched = to_json_string("auth_grants_json", &user.auth_grants)?;
        data.set("auth_grants_json", preserve_equivalent(current.as_deref(), fetched))
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let identity_id = data.require_id()?.to_string();
        let desired = basic_info(data)?;
        let desired_grants = grants(data)?;

        let current = self.fetch(meta, &identity_id).await?;
        if !desired.email.eq_ignore_ascii_case(&current.basic.email) {
            return Err(ProviderError::configuration(
                "email",
                "cannot change the e-mail address of an existing user",
            ));
        }

        let api = meta.iam()?;
        if basic_info_changed(&desired, &current.basic) {
            meta.call(
                NAME,
                "UpdateUserInfo",
                api.update_user_info(UpdateUserInfoRequest {
                    identity_id: identity_id.clone(),
                    basic: desired,
                }),
            )
            .await
            .map_err(with_advice)?;
        }
        if desired_grants != current.auth_grants {
            meta.call(
                NAME,
                "UpdateUserAuthGrants",
                api.update_user_auth_grants(UpdateUserAuthGrantsRequest {
                    identity_id,
                    auth_grants: desired_grants,
                }),
            )
            .await?;
        }
        Ok(())
    }

    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let identity_id = data.require_id()?.to_string();
        let api = meta.iam()?;
        meta.call(NAME, "RemoveUser", api.remove_user(RemoveUserRequest { identity_id }))
            .await
    }
}
