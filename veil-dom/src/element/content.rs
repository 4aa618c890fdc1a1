#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<super::Element>),
}

impl Content {
    pub fn children(&self) -> &[super::Element] {
        match self {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [super::Element] {
        match self {
            Content::Children(children) => children,
            _ => &mut [],
        }
    }
}
