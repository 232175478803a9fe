use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

#[test]
fn test() {
    assert_eq!(Segment::This.to_string(), "this");
    assert_eq!("pointer".parse::<Segment>(), Ok(Segment::Pointer));
    assert!("field".parse::<Segment>().is_err());
}
