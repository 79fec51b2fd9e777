use serde::Deserialize;

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// body of `POST /save`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveRequest {
    pub file_name: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

impl SaveRequest {
    pub fn get_file_name(&self) -> Option<&str> {
        non_blank(&self.file_name)
    }
}

/// body of `POST /upload`, `base64_content` is the encoded asset
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadRequest {
    pub file_name: Option<String>,
    pub base64_content: Option<String>,
    pub blog_file_name: Option<String>,
}

impl UploadRequest {
    pub fn get_file_name(&self) -> Option<&str> {
        non_blank(&self.file_name)
    }

    pub fn get_blog_file_name(&self) -> Option<&str> {
        non_blank(&self.blog_file_name)
    }
}

/// body of `DELETE /delete`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteRequest {
    pub file_name: Option<String>,
}

impl DeleteRequest {
    pub fn get_file_name(&self) -> Option<&str> {
        non_blank(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_none() {
        let req: SaveRequest = serde_json::from_str(r#"{"title":"Hi"}"#).unwrap();
        assert_eq!(req.get_file_name(), None);
        assert_eq!(req.title.as_deref(), Some("Hi"));
        assert_eq!(req.content, None);
    }

    #[test]
    fn test_blank_file_name_is_rejected() {
        let req: DeleteRequest = serde_json::from_str(r#"{"fileName":"   "}"#).unwrap();
        assert_eq!(req.get_file_name(), None);

        let req: DeleteRequest = serde_json::from_str(r#"{"fileName":null}"#).unwrap();
        assert_eq!(req.get_file_name(), None);
    }

    #[test]
    fn test_upload_fields_are_camel_case() {
        let req: UploadRequest = serde_json::from_str(
            r#"{"fileName":"cat.png","base64Content":"AAEC","blogFileName":"hello"}"#,
        )
        .unwrap();

        assert_eq!(req.get_file_name(), Some("cat.png"));
        assert_eq!(req.get_blog_file_name(), Some("hello"));
        assert_eq!(req.base64_content.as_deref(), Some("AAEC"));
    }
}
