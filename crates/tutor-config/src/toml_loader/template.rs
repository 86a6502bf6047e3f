//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Tutor Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# The Gemini API key is read from the GOOGLE_API_KEY environment variable
# (a .env file in the working directory is honoured).

[server]
# host = "127.0.0.1"
# port = 8501
# session_ttl_secs = 3600     # 60-86400, idle browser sessions are dropped

[model]
# name = "gemini-1.5-pro"
# temperature = 0.7           # 0.0-2.0
# max_tokens = 4096           # 1-8192
# request_timeout_secs = 120  # 5-600

[tutor]
# subject = "Data Science"
# title = "Ask AI: Your Data Science Helper"
# default_level = "beginner"  # beginner, intermediate, advanced

[theme]
# dark_mode = false

[logging]
# level = "INFO"              # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
