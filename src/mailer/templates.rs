use chrono::{Datelike, Utc};

/// HTML body of the welcome mail sent after registration
pub fn welcome(name: Option<&str>, app_name: &str) -> String {
    let app = escape_html(app_name);
    let body = format!(
        r#"              <p style="color:#333333;font-size:16px;line-height:1.5;margin:0 0 20px;">{greeting}</p>
              <p style="color:#333333;font-size:16px;line-height:1.5;margin:0 0 20px;">
                Your account has been created. You can now sign in and start using {app}.
              </p>
              <p style="color:#666666;font-size:14px;line-height:1.5;margin:16px 0 0;">
                If you did not create this account, you can safely ignore this email.
              </p>"#,
        greeting = greeting(name),
    );

    layout(&format!("Welcome to {app}"), &app, &body)
}

/// HTML body of the password reset mail carrying a one-time code
pub fn reset_password_otp(otp: &str, name: Option<&str>, app_name: &str) -> String {
    let body = format!(
        r#"              <p style="color:#333333;font-size:16px;line-height:1.5;margin:0 0 20px;">{greeting}</p>
              <p style="color:#333333;font-size:16px;line-height:1.5;margin:0 0 20px;">
                We received a request to reset your password. Use the code below to proceed:
              </p>
              <table role="presentation" width="100%" cellpadding="0" cellspacing="0">
                <tr>
                  <td align="center" style="padding:20px 0;">
                    <span style="display:inline-block;background-color:#f4f4f7;border:2px dashed #1a1a2e;border-radius:8px;padding:16px 32px;font-size:32px;font-weight:bold;letter-spacing:8px;color:#1a1a2e;">{otp}</span>
                  </td>
                </tr>
              </table>
              <p style="color:#666666;font-size:14px;line-height:1.5;margin:20px 0 0;">
                This code will expire shortly. Do not share it with anyone.
              </p>
              <p style="color:#666666;font-size:14px;line-height:1.5;margin:16px 0 0;">
                If you did not request a password reset, you can safely ignore this email. Your password will remain unchanged.
              </p>"#,
        greeting = greeting(name),
        otp = escape_html(otp),
    );

    layout("Password Reset", &escape_html(app_name), &body)
}

/// "Hi <name>," or "Hi," when no usable name is given. Escaped.
fn greeting(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Hi {},", escape_html(name)),
        None => "Hi,".to_string(),
    }
}

/// Header, body and footer frame shared by every mail. All arguments must
/// already be escaped.
fn layout(title: &str, app: &str, body: &str) -> String {
    let year = Utc::now().year();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title}</title>
</head>
<body style="margin:0;padding:0;background-color:#f4f4f7;font-family:Arial,Helvetica,sans-serif;">
  <table role="presentation" width="100%" cellpadding="0" cellspacing="0" style="background-color:#f4f4f7;padding:40px 0;">
    <tr>
      <td align="center">
        <table role="presentation" width="600" cellpadding="0" cellspacing="0" style="background-color:#ffffff;border-radius:8px;overflow:hidden;">
          <tr>
            <td style="background-color:#1a1a2e;padding:30px;text-align:center;">
              <h1 style="color:#ffffff;margin:0;font-size:24px;">{app}</h1>
            </td>
          </tr>
          <tr>
            <td style="padding:40px 30px;">
{body}
            </td>
          </tr>
          <tr>
            <td style="background-color:#f4f4f7;padding:20px 30px;text-align:center;">
              <p style="color:#999999;font-size:12px;margin:0;">&copy; {year} {app}. All rights reserved.</p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>
"#
    )
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
