//! Payload construction for every supported content type.
//!
//! Everything in this module is pure string work: `encode` maps the current
//! form values to the text that ends up inside the QR code. The empty string
//! is the sentinel for "required input missing" and is never a valid payload.

/// The selected category of structured data being encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentType {
    Url,
    Text,
    Wifi,
    Email,
    Sms,
    Phone,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::Url,
        ContentType::Text,
        ContentType::Wifi,
        ContentType::Email,
        ContentType::Sms,
        ContentType::Phone,
    ];

    /// Stable value used by the type selector.
    pub fn value(self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Text => "text",
            ContentType::Wifi => "wifi",
            ContentType::Email => "email",
            ContentType::Sms => "sms",
            ContentType::Phone => "phone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Url => "Website URL",
            ContentType::Text => "Plain text",
            ContentType::Wifi => "Wi-Fi network",
            ContentType::Email => "Email",
            ContentType::Sms => "SMS",
            ContentType::Phone => "Phone number",
        }
    }

    pub fn from_value(value: &str) -> Option<ContentType> {
        ContentType::ALL.iter().copied().find(|ty| ty.value() == value)
    }
}

/// Wi-Fi credential group. The encryption value travels verbatim into the
/// payload; expected values are WPA, WEP and nopass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WifiFields {
    pub ssid: String,
    pub password: String,
    pub encryption: String,
    pub hidden: bool,
}

impl Default for WifiFields {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            password: String::new(),
            encryption: "WPA".to_owned(),
            hidden: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmailFields {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SmsFields {
    pub number: String,
    pub message: String,
}

/// Raw values of every form field, across all groups. Only the group matching
/// the current [`ContentType`] feeds the payload; the rest is kept so
/// switching types back and forth loses nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub url: String,
    pub text: String,
    pub wifi: WifiFields,
    pub email: EmailFields,
    pub sms: SmsFields,
    pub phone: String,
}

/// Identity of a single editable text field, used to route edit events from
/// the UI down to [`FormFields::set`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Url,
    Text,
    WifiSsid,
    WifiPassword,
    WifiEncryption,
    EmailTo,
    EmailSubject,
    EmailBody,
    SmsNumber,
    SmsMessage,
    PhoneNumber,
}

impl FormFields {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Url => self.url = value,
            Field::Text => self.text = value,
            Field::WifiSsid => self.wifi.ssid = value,
            Field::WifiPassword => self.wifi.password = value,
            Field::WifiEncryption => self.wifi.encryption = value,
            Field::EmailTo => self.email.to = value,
            Field::EmailSubject => self.email.subject = value,
            Field::EmailBody => self.email.body = value,
            Field::SmsNumber => self.sms.number = value,
            Field::SmsMessage => self.sms.message = value,
            Field::PhoneNumber => self.phone = value,
        }
    }
}

/// Builds the payload for the given content type, or `""` when a required
/// field is missing. Pure: the output depends only on the arguments.
pub fn encode(content_type: ContentType, fields: &FormFields) -> String {
    match content_type {
        ContentType::Url => fields.url.trim().to_owned(),
        ContentType::Text => fields.text.trim().to_owned(),
        ContentType::Wifi => encode_wifi(&fields.wifi),
        ContentType::Email => encode_email(&fields.email),
        ContentType::Sms => encode_sms(&fields.sms),
        ContentType::Phone => {
            let number = fields.phone.trim();
            if number.is_empty() {
                String::new()
            } else {
                format!("tel:{number}")
            }
        }
    }
}

// WIFI:T:<enc>;S:<ssid>;[P:<password>;][H:true;];
fn encode_wifi(wifi: &WifiFields) -> String {
    let ssid = wifi.ssid.trim();
    if ssid.is_empty() {
        return String::new();
    }
    let mut out = format!("WIFI:T:{};S:{};", wifi.encryption, escape_wifi(ssid));
    let password = wifi.password.trim();
    if !password.is_empty() {
        out.push_str("P:");
        out.push_str(&escape_wifi(password));
        out.push(';');
    }
    if wifi.hidden {
        out.push_str("H:true;");
    }
    out.push(';');
    out
}

fn encode_email(email: &EmailFields) -> String {
    let to = email.to.trim();
    if to.is_empty() {
        return String::new();
    }
    let mut params = Vec::new();
    let subject = email.subject.trim();
    if !subject.is_empty() {
        params.push(format!("subject={}", urlencoding::encode(subject)));
    }
    let body = email.body.trim();
    if !body.is_empty() {
        params.push(format!("body={}", urlencoding::encode(body)));
    }
    if params.is_empty() {
        format!("mailto:{to}")
    } else {
        format!("mailto:{}?{}", to, params.join("&"))
    }
}

fn encode_sms(sms: &SmsFields) -> String {
    let number = sms.number.trim();
    if number.is_empty() {
        return String::new();
    }
    let message = sms.message.trim();
    if message.is_empty() {
        format!("SMSTO:{number}")
    } else {
        format!("SMSTO:{number}:{message}")
    }
}

/// Backslash-escapes the characters that act as separators in the Wi-Fi
/// payload grammar. Not idempotent: escape exactly once, at interpolation.
pub fn escape_wifi(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if matches!(c, '\\' | ';' | ',' | ':' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wifi(ssid: &str, password: &str, encryption: &str, hidden: bool) -> FormFields {
        FormFields {
            wifi: WifiFields {
                ssid: ssid.to_owned(),
                password: password.to_owned(),
                encryption: encryption.to_owned(),
                hidden,
            },
            ..FormFields::default()
        }
    }

    #[test]
    fn empty_required_fields_yield_the_sentinel() {
        let fields = FormFields::default();
        for ty in ContentType::ALL {
            assert_eq!(encode(ty, &fields), "", "{:?} with no input", ty);
        }
    }

    #[test]
    fn url_and_text_pass_through_trimmed() {
        let mut fields = FormFields::default();
        fields.url = "  https://example.com  ".to_owned();
        fields.text = "\thello world\n".to_owned();
        assert_eq!(encode(ContentType::Url, &fields), "https://example.com");
        assert_eq!(encode(ContentType::Text, &fields), "hello world");
    }

    #[test]
    fn wifi_escapes_separators_and_emits_all_segments() {
        let fields = wifi("My;Net", "p\"w", "WPA", true);
        assert_eq!(
            encode(ContentType::Wifi, &fields),
            "WIFI:T:WPA;S:My\\;Net;P:p\\\"w;H:true;;"
        );
    }

    #[test]
    fn wifi_omits_password_segment_when_blank() {
        let fields = wifi("Net", "", "WEP", false);
        assert_eq!(encode(ContentType::Wifi, &fields), "WIFI:T:WEP;S:Net;;");
    }

    #[test]
    fn wifi_omits_hidden_segment_when_flag_is_off() {
        let fields = wifi("Net", "secret", "WPA", false);
        assert_eq!(encode(ContentType::Wifi, &fields), "WIFI:T:WPA;S:Net;P:secret;;");
    }

    #[test]
    fn wifi_requires_an_ssid() {
        let fields = wifi("   ", "secret", "WPA", true);
        assert_eq!(encode(ContentType::Wifi, &fields), "");
    }

    #[test]
    fn wifi_passes_encryption_through_verbatim() {
        let fields = wifi("Net", "", "nopass", false);
        assert_eq!(encode(ContentType::Wifi, &fields), "WIFI:T:nopass;S:Net;;");
    }

    #[test]
    fn email_omits_blank_query_parts_individually() {
        let mut fields = FormFields::default();
        fields.email = EmailFields {
            to: "a@b.com".to_owned(),
            subject: String::new(),
            body: "hi".to_owned(),
        };
        assert_eq!(encode(ContentType::Email, &fields), "mailto:a@b.com?body=hi");
    }

    #[test]
    fn email_without_extras_has_no_query() {
        let mut fields = FormFields::default();
        fields.email.to = "a@b.com".to_owned();
        assert_eq!(encode(ContentType::Email, &fields), "mailto:a@b.com");
    }

    #[test]
    fn email_encodes_query_components() {
        let mut fields = FormFields::default();
        fields.email = EmailFields {
            to: "a@b.com".to_owned(),
            subject: "sale 50%".to_owned(),
            body: "see you & bring cake".to_owned(),
        };
        assert_eq!(
            encode(ContentType::Email, &fields),
            "mailto:a@b.com?subject=sale%2050%25&body=see%20you%20%26%20bring%20cake"
        );
    }

    #[test]
    fn sms_message_is_optional() {
        let mut fields = FormFields::default();
        fields.sms.number = "123".to_owned();
        assert_eq!(encode(ContentType::Sms, &fields), "SMSTO:123");
        fields.sms.message = "on my way".to_owned();
        assert_eq!(encode(ContentType::Sms, &fields), "SMSTO:123:on my way");
    }

    #[test]
    fn phone_prefixes_tel() {
        let mut fields = FormFields::default();
        fields.phone = " +43 123 456 ".to_owned();
        assert_eq!(encode(ContentType::Phone, &fields), "tel:+43 123 456");
    }

    #[test]
    fn escape_wifi_covers_every_reserved_character() {
        assert_eq!(escape_wifi(r#"\;,:""#), "\\\\\\;\\,\\:\\\"");
        assert_eq!(escape_wifi("plain"), "plain");
    }

    #[test]
    fn escape_wifi_is_not_idempotent() {
        let once = escape_wifi(";");
        assert_eq!(once, "\\;");
        assert_eq!(escape_wifi(&once), "\\\\\\;");
    }

    #[test]
    fn content_type_values_round_trip() {
        for ty in ContentType::ALL {
            assert_eq!(ContentType::from_value(ty.value()), Some(ty));
        }
        assert_eq!(ContentType::from_value("vcard"), None);
    }
}
