use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

static PERSON_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z .'-]*$").expect("person name pattern compiles"));

/// Ten digits starting 6-9
static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("mobile number pattern compiles"));

static PIN_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{5}$").expect("pin code pattern compiles"));

const PASSWORD_SPECIALS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let rules: [(&str, fn(char) -> bool, &str); 4] = [
        ("password_upper", char::is_uppercase, "Password must contain an uppercase letter"),
        ("password_lower", char::is_lowercase, "Password must contain a lowercase letter"),
        ("password_digit", |c| c.is_ascii_digit(), "Password must contain a digit"),
        (
            "password_special",
            |c| PASSWORD_SPECIALS.contains(c),
            "Password must contain one of !@#$%^&*()_+-=[]{}|;:,.<>?",
        ),
    ];

    for (code, rule, message) in rules {
        if !password.chars().any(rule) {
            return Err(ValidationError::new(code).with_message(message.into()));
        }
    }
    Ok(())
}

/// Account roles. Input is matched case-insensitively, output is upper-case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum RoleType {
    Customer,
    Seller,
    Admin,
}

impl<'de> Deserialize<'de> for RoleType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown role: {}", raw)))
    }
}

/// A stored account, including its password hash
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub roles: Vec<RoleType>,
    /// Live addresses only
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    pub fn has_role(&self, role: RoleType) -> bool {
        self.roles.contains(&role)
    }
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    pub roles: Vec<RoleType>,
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            middle_name: user.middle_name,
            last_name: user.last_name,
            email: user.email,
            mobile_number: user.mobile_number,
            roles: user.roles,
            addresses: user.addresses,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub door_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    /// e.g. `HOME`, `WORK`
    pub address_type: String,
    pub landmark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateAddress {
    #[validate(length(min = 1, max = 20, message = "Door number must be between 1 and 20 characters"))]
    pub door_number: String,
    #[validate(length(min = 1, max = 100, message = "Street must be between 1 and 100 characters"))]
    pub street: String,
    #[validate(length(min = 1, max = 50, message = "City must be between 1 and 50 characters"))]
    pub city: String,
    #[validate(length(min = 1, max = 50, message = "State must be between 1 and 50 characters"))]
    pub state: String,
    #[validate(regex(path = *PIN_CODE, message = "Pin code must be six digits"))]
    pub pin_code: String,
    #[validate(length(min = 1, max = 20, message = "Address type must be between 1 and 20 characters"))]
    pub address_type: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub landmark: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(
        length(min = 1, max = 50),
        regex(path = *PERSON_NAME, message = "First name may contain letters, spaces and . ' -")
    )]
    pub first_name: String,
    #[validate(length(min = 1, max = 50), regex(path = *PERSON_NAME))]
    #[serde(default)]
    pub middle_name: Option<String>,
    #[validate(
        length(min = 1, max = 50),
        regex(path = *PERSON_NAME, message = "Last name may contain letters, spaces and . ' -")
    )]
    pub last_name: String,
    #[validate(email(message = "Email must be a valid address"), length(max = 255))]
    pub email: String,
    #[validate(regex(path = *MOBILE_NUMBER, message = "Mobile number must be ten digits starting 6-9"))]
    pub mobile_number: String,
    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
    /// Defaults to `CUSTOMER`
    #[serde(default)]
    pub roles: Vec<RoleType>,
    #[validate(nested)]
    #[serde(default)]
    pub addresses: Vec<CreateAddress>,
}

/// Full replacement of the caller's profile; roles, addresses and password are kept
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 50), regex(path = *PERSON_NAME))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50), regex(path = *PERSON_NAME))]
    #[serde(default)]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 50), regex(path = *PERSON_NAME))]
    pub last_name: String,
    #[validate(email(message = "Email must be a valid address"), length(max = 255))]
    pub email: String,
    #[validate(regex(path = *MOBILE_NUMBER, message = "Mobile number must be ten digits starting 6-9"))]
    pub mobile_number: String,
}

/// Columns written on signup; the password is already hashed
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub roles: Vec<RoleType>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signup() -> serde_json::Value {
        json!({
            "first_name": "Asha",
            "last_name": "Rao",
            "email": "asha@example.com",
            "mobile_number": "9876543210",
            "password": "Str0ng!pass",
            "addresses": [{
                "door_number": "12B",
                "street": "MG Road",
                "city": "Chennai",
                "state": "Tamil Nadu",
                "pin_code": "600001",
                "address_type": "HOME"
            }]
        })
    }

    #[test]
    fn test_roles_parse_case_insensitively() {
        let roles: Vec<RoleType> = serde_json::from_value(json!(["customer", "Seller", "ADMIN"])).unwrap();
        assert_eq!(roles, vec![RoleType::Customer, RoleType::Seller, RoleType::Admin]);
        assert_eq!(serde_json::to_value(RoleType::Customer).unwrap(), json!("CUSTOMER"));
        assert_eq!(RoleType::Seller.to_string(), "SELLER");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result: Result<RoleType, _> = serde_json::from_value(json!("GUEST"));
        assert!(result.unwrap_err().to_string().contains("unknown role: GUEST"));
    }

    #[test]
    fn test_valid_signup() {
        let input: CreateUser = serde_json::from_value(signup()).unwrap();
        assert!(input.roles.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_weak_passwords() {
        for password in ["short1!", "alllower1!", "ALLUPPER1!", "NoDigits!!", "NoSpecial12"] {
            let mut body = signup();
            body["password"] = json!(password);
            let input: CreateUser = serde_json::from_value(body).unwrap();
            let errors = input.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("password"), "{password} should be rejected");
        }
    }

    #[test]
    fn test_bad_mobile_number() {
        for mobile in ["12345", "5876543210", "98765432101", "98765abcde"] {
            let mut body = signup();
            body["mobile_number"] = json!(mobile);
            let input: CreateUser = serde_json::from_value(body).unwrap();
            assert!(input.validate().is_err(), "{mobile} should be rejected");
        }
    }

    #[test]
    fn test_nested_address_is_validated() {
        let mut body = signup();
        body["addresses"][0]["pin_code"] = json!("60001");
        let input: CreateUser = serde_json::from_value(body).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_full_name_with_middle_name() {
        let now = Utc::now();
        let mut user = User {
            id: Uuid::now_v7(),
            first_name: "Asha".into(),
            middle_name: None,
            last_name: "Rao".into(),
            email: "asha@example.com".into(),
            mobile_number: "9876543210".into(),
            password_hash: String::new(),
            roles: vec![RoleType::Customer],
            addresses: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(user.full_name(), "Asha Rao");
        user.middle_name = Some("K".into());
        assert_eq!(user.full_name(), "Asha K Rao");
    }
}
