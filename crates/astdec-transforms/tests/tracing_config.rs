use super::*;

#[test]
fn test_log_format_parse() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
}

#[test]
fn test_env_names() {
    assert_eq!(LOG_ENV, "ASTDEC_LOG");
    assert_eq!(LOG_FORMAT_ENV, "ASTDEC_LOG_FORMAT");
}
