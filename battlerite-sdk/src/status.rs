use crate::decode::{self, Decode, Fields};
use crate::{Handle, Result};
use std::sync::Arc;

pub struct StatusRequestBuilder {
    handle: Arc<Handle>,
}

impl StatusRequestBuilder {
    pub fn new(handle: Arc<Handle>) -> Self {
        Self { handle }
    }
    pub async fn send(self) -> Result<Status> {
        let res = self
            .handle
            .get_document(&self.handle.status_url, &[])
            .await?;
        Ok(res.decode_single()?)
    }
}

/// State of the Gamelocker API.
///
/// See <https://battlerite-docs.readthedocs.io/en/latest/status/status.html>
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Status {
    pub kind: String,
    pub id: String,
    pub released_at: String,
    pub version: String,
}

impl Decode for Status {
    fn decode(fields: &Fields<'_>) -> decode::Result<Self> {
        let attributes = fields.object("attributes")?;
        Ok(Self {
            kind: fields.string("type")?,
            id: fields.string("id")?,
            released_at: attributes.string("releasedAt")?,
            version: attributes.string("version")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Response;
    use serde_json::json;

    #[test]
    fn decodes_status_document() {
        let res: Response = serde_json::from_value(json!({
            "data": {
                "type": "status",
                "id": "gamelocker",
                "attributes": { "releasedAt": "2018-03-01T00:00:00Z", "version": "v5.1.0" }
            }
        }))
        .unwrap();
        let status: Status = res.decode_single().unwrap();
        assert_eq!(status.kind, "status");
        assert_eq!(status.version, "v5.1.0");
    }
}
