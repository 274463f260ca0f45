use crate::{AttributeValue, Attributes, BatchEntry, BoxError};
use aws_sdk_sqs::{
    error::BuildError,
    types::{MessageAttributeValue, SendMessageBatchRequestEntry},
};
use std::collections::HashMap;

impl TryFrom<&AttributeValue> for MessageAttributeValue {
    type Error = BuildError;

    fn try_from(value: &AttributeValue) -> Result<Self, Self::Error> {
        MessageAttributeValue::builder()
            .data_type(value.kind().as_str())
            .string_value(value.string_value())
            .build()
    }
}

// None for an empty map so the request carries no attribute section at all
pub(crate) fn sqs_attributes(
    attributes: &Attributes,
) -> Result<Option<HashMap<String, MessageAttributeValue>>, BuildError> {
    if attributes.is_empty() {
        return Ok(None);
    }
    let converted = attributes
        .iter()
        .map(|(name, value)| MessageAttributeValue::try_from(value).map(|v| (name.clone(), v)))
        .collect::<Result<HashMap<_, _>, _>>()?;
    Ok(Some(converted))
}

impl TryFrom<&BatchEntry> for SendMessageBatchRequestEntry {
    type Error = BoxError;

    fn try_from(entry: &BatchEntry) -> Result<Self, Self::Error> {
        let entry = SendMessageBatchRequestEntry::builder()
            .id(&entry.id)
            .message_body(&entry.body)
            .delay_seconds(i32::try_from(entry.delay_seconds)?)
            .set_message_attributes(sqs_attributes(&entry.attributes)?)
            .build()?;
        Ok(entry)
    }
}
