use pdf_writer::Ref;
use std::collections::HashMap;

/// The indirect objects a serialized manuscript PDF is made of
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    /// One of the three base-14 font resources, keyed by [crate::FontStyle::index]
    Font(usize),
    /// An embedded figure image, keyed by emission order
    Image(usize),
    /// The alpha soft mask of an embedded figure image
    ImageMask(usize),
}

pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        self.refs.insert(ref_type, id);
        id
    }
}
