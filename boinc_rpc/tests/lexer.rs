use boinc_rpc::xml::{
    Cdata, Characters, EmptyElementTag, EndTag, Lexer, ProcessingInstruction, StartTag, Ty,
};

const SUCCESS_XML: &str = include_str!("../tests/resources/success.xml");
const GET_MESSAGES_XML: &str = include_str!("../tests/resources/get_messages.xml");
const GET_STATE_XML: &str = include_str!("../tests/resources/get_state.xml");

fn tokenize_via_iterator(input: &str, expected_tokens: &[Ty<'_>]) {
    let lexer = Lexer::new(input);

    for (expected_token, token) in expected_tokens.iter().zip(lexer.iter(0)) {
        assert_eq!(*expected_token, token.ty());
    }

    assert_eq!(lexer.into_iter().count(), expected_tokens.len());
}

fn tokenize(input: &str, expected_tokens: &[Ty<'_>]) {
    let lexer = Lexer::new(input);
    let mut pos = 0;

    let mut expected_iter = expected_tokens.iter().copied();

    while let Some(token) = lexer.tokenize(&mut pos) {
        assert_eq!(Some(token.ty()), expected_iter.next());
    }

    assert_eq!(pos, input.len());
    assert_eq!(None, expected_iter.next());
}

fn success_tokens() -> [Ty<'static>; 7] {
    [
        Ty::ProcessingInstruction(ProcessingInstruction::from_str(
            r#"<?xml version="1.0" encoding="ISO-8859-1" ?>"#,
        )),
        Ty::Characters(Characters::from_str("\n")),
        Ty::StartTag(StartTag::from_str("<boinc_gui_rpc_reply>")),
        Ty::Characters(Characters::from_str("\n")),
        Ty::EmptyElementTag(EmptyElementTag::from_str("<success/>")),
        Ty::Characters(Characters::from_str("\n")),
        Ty::EndTag(EndTag::from_str("</boinc_gui_rpc_reply>")),
    ]
}

#[test]
fn tokenize_success_xml() {
    let mut expected = success_tokens().to_vec();
    expected.push(Ty::Characters(Characters::from_str("\n")));
    tokenize(SUCCESS_XML, &expected);
}

#[test]
fn tokenize_iter_success_xml() {
    let mut expected = success_tokens().to_vec();
    expected.push(Ty::Characters(Characters::from_str("\n")));
    tokenize_via_iterator(SUCCESS_XML, &expected);
}

#[test]
fn tokenize_message_body_cdata() {
    let lexer = Lexer::new(GET_MESSAGES_XML);
    let cdata: Vec<_> = lexer
        .iter(0)
        .filter_map(|token| match token.ty() {
            Ty::Cdata(cdata) => Some(cdata),
            _ => None,
        })
        .collect();
    assert_eq!(3, cdata.len());
    assert_eq!(
        Cdata::from_str("<![CDATA[\nSending scheduler request: To fetch work.\n]]>"),
        cdata[2]
    );
    assert_eq!(
        "\nSending scheduler request: To fetch work.\n",
        cdata[2].content()
    );
}

#[test]
fn tokenize_get_state_completely() {
    let lexer = Lexer::new(GET_STATE_XML);
    let mut pos = 0;
    let mut start_tags = 0;
    let mut end_tags = 0;
    while let Some(token) = lexer.tokenize(&mut pos) {
        assert_eq!(token.offset() + token.len(), pos);
        match token.ty() {
            Ty::StartTag(_) => start_tags += 1,
            Ty::EndTag(_) => end_tags += 1,
            _ => {}
        }
    }
    assert_eq!(GET_STATE_XML.len(), pos);
    assert_eq!(start_tags, end_tags);
}

#[test]
fn incomplete_end_tag_is_not_a_token() {
    let input = "<seqno>123</seqno";
    let lexer = Lexer::new(input);
    let mut pos = 0;

    assert_eq!(
        Some(Ty::StartTag(StartTag::from_str("<seqno>"))),
        lexer.tokenize(&mut pos).map(|token| token.ty())
    );
    assert_eq!(7, pos);
    assert_eq!(
        Some(Ty::Characters(Characters::from_str("123"))),
        lexer.tokenize(&mut pos).map(|token| token.ty())
    );
    assert_eq!(10, pos);
    assert_eq!(None, lexer.tokenize(&mut pos));
    assert_eq!(10, pos);
}
