/// Environment variable naming the DynamoDB table forms are written to
pub const FORM_TABLE_NAME: &str = "FORM_TABLE_NAME";
/// Environment variable enabling a conditional put on `form_id`
pub const FORM_TABLE_CONDITIONAL_PUT: &str = "FORM_TABLE_CONDITIONAL_PUT";
