use api_contract::{
    ContextProperty, EmptyPayload, ErrorKind, ErrorPayload, Event, EventContext, EventEnvelope,
    EventPayload, Header,
};
use serde_json::json;

fn envelope(payload: EventPayload, context: Option<EventContext>) -> EventEnvelope {
    EventEnvelope {
        context,
        event: Event {
            header: Header::new("Alexa", "Response", "abc-R", None),
            endpoint: None,
            payload,
        },
    }
}

#[test]
fn empty_payload_serializes_as_object() {
    let value = serde_json::to_value(envelope(EventPayload::Empty(EmptyPayload {}), None))
        .expect("serialize");
    assert_eq!(value["event"]["payload"], json!({}));
    assert!(value.get("context").is_none());
    assert!(value["event"].get("endpoint").is_none());
    assert!(value["event"]["header"].get("correlationToken").is_none());
    assert_eq!(value["event"]["header"]["payloadVersion"], "3");
}

#[test]
fn context_property_is_camel_case() {
    let context = EventContext {
        properties: vec![ContextProperty {
            namespace: "Alexa.PowerController".to_string(),
            name: "powerState".to_string(),
            value: "ON".to_string(),
            time_of_sample: "2017-09-03T16:20:50.520Z".to_string(),
            uncertainty_in_milliseconds: 50,
        }],
    };
    let value = serde_json::to_value(envelope(EventPayload::Empty(EmptyPayload {}), Some(context)))
        .expect("serialize");
    let property = &value["context"]["properties"][0];
    assert_eq!(property["timeOfSample"], "2017-09-03T16:20:50.520Z");
    assert_eq!(property["uncertaintyInMilliseconds"], 50);
}

#[test]
fn error_event_round_trips_through_json() {
    let original = envelope(
        EventPayload::Error(ErrorPayload {
            kind: ErrorKind::EndpointUnreachable,
            message: "timeout".to_string(),
        }),
        None,
    );
    let text = serde_json::to_string(&original).expect("serialize");
    let parsed: EventEnvelope = serde_json::from_str(&text).expect("parse");
    assert_eq!(parsed.error_kind(), Some(ErrorKind::EndpointUnreachable));
    assert_eq!(parsed, original);
}
