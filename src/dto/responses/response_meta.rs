use serde_derive::Serialize;

#[derive(Serialize)]
pub struct ResponseMeta<M: serde::Serialize> {
    time_to_process: String,
    #[serde(skip_serializing_if = "is_unit")]
    metadata: Option<M>,
}

fn is_unit<M>(metadata: &Option<M>) -> bool {
    metadata.is_none() || std::mem::size_of::<M>() == 0
}

impl<M: serde::Serialize> ResponseMeta<M> {
    pub fn from(start: tokio::time::Instant, metadata: M) -> Self {
        ResponseMeta {
            time_to_process: format!("{:?}", start.elapsed()),
            metadata: Some(metadata),
        }
    }
}
