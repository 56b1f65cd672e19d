use crate::dns_message::{DnsMessage, ResponseCode, OPCODE_QUERY};
use crate::dns_query::DnsQuery;
use crate::dns_record::CLASS_IN;
use crate::errors::ProtocolError;

/// Checks that a decoded message is a query this responder can process.
///
/// The record type is deliberately not checked here: a well-formed question
/// for a type other than A is answered with NOTIMP by the response builder.
pub fn validate(message: &DnsMessage) -> Result<DnsQuery, ProtocolError> {
    if message.is_response() {
        return Err(ProtocolError::NotAQuery);
    }

    let opcode = message.opcode();
    if opcode != OPCODE_QUERY {
        return Err(ProtocolError::UnsupportedOpcode(opcode));
    }

    let question = match message.questions.as_slice() {
        [] => return Err(ProtocolError::NoQuestion),
        [question] => question,
        many => return Err(ProtocolError::TooManyQuestions(many.len() as u16)),
    };

    if question.class != CLASS_IN {
        return Err(ProtocolError::UnsupportedClass(question.class));
    }

    Ok(DnsQuery {
        id: message.id,
        name: question.name.clone(),
        record_type: question.record_type,
        class: question.class,
        recursion_desired: message.recursion_desired(),
    })
}

/// Response code for a rejected message, or `None` when no reply should be
/// sent at all (inbound responses are never answered).
pub fn rejection_code(error: &ProtocolError) -> Option<ResponseCode> {
    match error {
        ProtocolError::NotAQuery => None,
        ProtocolError::UnsupportedOpcode(_) | ProtocolError::UnsupportedClass(_) => {
            Some(ResponseCode::NotImp)
        }
        _ => Some(ResponseCode::FormErr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns_message::{flags, DnsQuestion};
    use crate::dns_record::RecordType;

    fn a_query() -> DnsMessage {
        DnsMessage::query(42, DnsQuestion::new("svc.example.com", RecordType::A))
    }

    #[test]
    fn accepts_single_a_question() {
        let query = validate(&a_query()).unwrap();
        assert_eq!(query.id, 42);
        assert_eq!(query.name, "svc.example.com");
        assert!(query.recursion_desired);
        assert!(query.is_supported());
    }

    #[test]
    fn accepts_unsupported_type_for_later_notimp() {
        let message = DnsMessage::query(1, DnsQuestion::new("svc.example.com", RecordType::MX));
        let query = validate(&message).unwrap();
        assert!(!query.is_supported());
    }

    #[test]
    fn rejects_empty_question_section() {
        let mut message = a_query();
        message.questions.clear();
        let err = validate(&message).unwrap_err();
        assert_eq!(err, ProtocolError::NoQuestion);
        assert_eq!(rejection_code(&err), Some(ResponseCode::FormErr));
    }

    #[test]
    fn rejects_non_query_opcode() {
        let mut message = a_query();
        message.flags |= 2 << 11;
        let err = validate(&message).unwrap_err();
        assert_eq!(err, ProtocolError::UnsupportedOpcode(2));
        assert_eq!(rejection_code(&err), Some(ResponseCode::NotImp));
    }

    #[test]
    fn rejects_chaos_class() {
        let mut message = a_query();
        message.questions[0].class = 3;
        assert_eq!(
            validate(&message).unwrap_err(),
            ProtocolError::UnsupportedClass(3)
        );
    }

    #[test]
    fn never_answers_responses() {
        let mut message = a_query();
        message.flags |= flags::RESPONSE;
        let err = validate(&message).unwrap_err();
        assert_eq!(rejection_code(&err), None);
    }
}
