use oxigraph::model::NamedNodeRef;

pub struct SHACL {
    pub and_: NamedNodeRef<'static>,
    pub class: NamedNodeRef<'static>,
    pub closed: NamedNodeRef<'static>,
    pub datatype: NamedNodeRef<'static>,
    pub deactivated: NamedNodeRef<'static>,
    pub default_value: NamedNodeRef<'static>,
    pub description: NamedNodeRef<'static>,
    pub flags: NamedNodeRef<'static>,
    pub group: NamedNodeRef<'static>,
    pub has_value: NamedNodeRef<'static>,
    pub ignored_properties: NamedNodeRef<'static>,
    pub in_: NamedNodeRef<'static>, // `in` is a reserved keyword in Rust
    pub language_in: NamedNodeRef<'static>,
    pub max_count: NamedNodeRef<'static>,
    pub max_exclusive: NamedNodeRef<'static>,
    pub max_inclusive: NamedNodeRef<'static>,
    pub max_length: NamedNodeRef<'static>,
    pub min_count: NamedNodeRef<'static>,
    pub min_exclusive: NamedNodeRef<'static>,
    pub min_inclusive: NamedNodeRef<'static>,
    pub min_length: NamedNodeRef<'static>,
    pub name: NamedNodeRef<'static>,
    pub node: NamedNodeRef<'static>,
    pub node_kind: NamedNodeRef<'static>,
    pub not: NamedNodeRef<'static>,
    pub or_: NamedNodeRef<'static>,
    pub order: NamedNodeRef<'static>,
    pub pattern: NamedNodeRef<'static>,
    pub property: NamedNodeRef<'static>,
    pub unique_lang: NamedNodeRef<'static>,
    pub xone: NamedNodeRef<'static>,

    // Classes
    pub node_shape: NamedNodeRef<'static>,
    pub property_shape: NamedNodeRef<'static>,
    pub property_group: NamedNodeRef<'static>,

    // Paths
    pub path: NamedNodeRef<'static>,
    pub inverse_path: NamedNodeRef<'static>,
    pub alternative_path: NamedNodeRef<'static>,
    pub zero_or_more_path: NamedNodeRef<'static>,
    pub one_or_more_path: NamedNodeRef<'static>,
    pub zero_or_one_path: NamedNodeRef<'static>,

    // NodeKind instances
    pub iri: NamedNodeRef<'static>,
    pub literal: NamedNodeRef<'static>,
    pub blank_node: NamedNodeRef<'static>,
    pub blank_node_or_iri: NamedNodeRef<'static>,
    pub blank_node_or_literal: NamedNodeRef<'static>,
    pub iri_or_literal: NamedNodeRef<'static>,
}

impl SHACL {
    pub const fn new() -> Self {
        SHACL {
            and_: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#and"),
            class: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#class"),
            closed: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#closed"),
            datatype: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#datatype"),
            deactivated: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#deactivated"),
            default_value: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#defaultValue"),
            description: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#description"),
            flags: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#flags"),
            group: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#group"),
            has_value: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#hasValue"),
            ignored_properties: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#ignoredProperties",
            ),
            in_: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#in"),
            language_in: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#languageIn"),
            max_count: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#maxCount"),
            max_exclusive: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#maxExclusive"),
            max_inclusive: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#maxInclusive"),
            max_length: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#maxLength"),
            min_count: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#minCount"),
            min_exclusive: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#minExclusive"),
            min_inclusive: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#minInclusive"),
            min_length: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#minLength"),
            name: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#name"),
            node: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#node"),
            node_kind: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#nodeKind"),
            not: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#not"),
            or_: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#or"),
            order: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#order"),
            pattern: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#pattern"),
            property: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#property"),
            unique_lang: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#uniqueLang"),
            xone: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#xone"),

            node_shape: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#NodeShape"),
            property_shape: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#PropertyShape"),
            property_group: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#PropertyGroup"),

            path: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#path"),
            inverse_path: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#inversePath"),
            alternative_path: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#alternativePath",
            ),
            zero_or_more_path: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#zeroOrMorePath",
            ),
            one_or_more_path: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#oneOrMorePath",
            ),
            zero_or_one_path: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#zeroOrOnePath",
            ),

            iri: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#IRI"),
            literal: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#Literal"),
            blank_node: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#BlankNode"),
            blank_node_or_iri: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#BlankNodeOrIRI",
            ),
            blank_node_or_literal: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#BlankNodeOrLiteral",
            ),
            iri_or_literal: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#IRIOrLiteral"),
        }
    }
}

/// Extension vocabulary layered over SHACL Core by the code generator.
pub struct SHACLMATE {
    pub node_shape: NamedNodeRef<'static>,
    pub property_shape: NamedNodeRef<'static>,

    pub abstract_: NamedNodeRef<'static>,
    pub extern_: NamedNodeRef<'static>,
    pub from_rdf_type: NamedNodeRef<'static>,
    pub mutable: NamedNodeRef<'static>,
    pub name: NamedNodeRef<'static>,
    pub rdf_type: NamedNodeRef<'static>,
    pub to_rdf_type: NamedNodeRef<'static>,
    pub visibility: NamedNodeRef<'static>,

    // Visibility instances
    pub visibility_private: NamedNodeRef<'static>,
    pub visibility_protected: NamedNodeRef<'static>,
    pub visibility_public: NamedNodeRef<'static>,
}

impl SHACLMATE {
    pub const fn new() -> Self {
        SHACLMATE {
            node_shape: NamedNodeRef::new_unchecked("http://purl.org/shaclmate/ontology#NodeShape"),
            property_shape: NamedNodeRef::new_unchecked(
                "http://purl.org/shaclmate/ontology#PropertyShape",
            ),

            abstract_: NamedNodeRef::new_unchecked("http://purl.org/shaclmate/ontology#abstract"),
            extern_: NamedNodeRef::new_unchecked("http://purl.org/shaclmate/ontology#extern"),
            from_rdf_type: NamedNodeRef::new_unchecked(
                "http://purl.org/shaclmate/ontology#fromRdfType",
            ),
            mutable: NamedNodeRef::new_unchecked("http://purl.org/shaclmate/ontology#mutable"),
            name: NamedNodeRef::new_unchecked("http://purl.org/shaclmate/ontology#name"),
            rdf_type: NamedNodeRef::new_unchecked("http://purl.org/shaclmate/ontology#rdfType"),
            to_rdf_type: NamedNodeRef::new_unchecked(
                "http://purl.org/shaclmate/ontology#toRdfType",
            ),
            visibility: NamedNodeRef::new_unchecked(
                "http://purl.org/shaclmate/ontology#visibility",
            ),

            visibility_private: NamedNodeRef::new_unchecked(
                "http://purl.org/shaclmate/ontology#_Visibility_Private",
            ),
            visibility_protected: NamedNodeRef::new_unchecked(
                "http://purl.org/shaclmate/ontology#_Visibility_Protected",
            ),
            visibility_public: NamedNodeRef::new_unchecked(
                "http://purl.org/shaclmate/ontology#_Visibility_Public",
            ),
        }
    }
}

pub struct RDF {
    pub type_: NamedNodeRef<'static>,
    pub first: NamedNodeRef<'static>,
    pub rest: NamedNodeRef<'static>,
    pub nil: NamedNodeRef<'static>,
}

impl RDF {
    pub const fn new() -> Self {
        RDF {
            type_: NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
            first: NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#first"),
            rest: NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#rest"),
            nil: NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#nil"),
        }
    }
}

pub struct RDFS {
    pub sub_class_of: NamedNodeRef<'static>,
    pub label: NamedNodeRef<'static>,
    pub comment: NamedNodeRef<'static>,
    pub is_defined_by: NamedNodeRef<'static>,
}

impl RDFS {
    pub const fn new() -> Self {
        RDFS {
            sub_class_of: NamedNodeRef::new_unchecked(
                "http://www.w3.org/2000/01/rdf-schema#subClassOf",
            ),
            label: NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label"),
            comment: NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#comment"),
            is_defined_by: NamedNodeRef::new_unchecked(
                "http://www.w3.org/2000/01/rdf-schema#isDefinedBy",
            ),
        }
    }
}

pub struct OWL {
    pub ontology: NamedNodeRef<'static>,
    pub version_iri: NamedNodeRef<'static>,
}

impl OWL {
    pub const fn new() -> Self {
        OWL {
            ontology: NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology"),
            version_iri: NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionIRI"),
        }
    }
}

pub struct XSD {
    pub boolean: NamedNodeRef<'static>,
    pub date: NamedNodeRef<'static>,
    pub date_time: NamedNodeRef<'static>,
    pub decimal: NamedNodeRef<'static>,
    pub double: NamedNodeRef<'static>,
    pub integer: NamedNodeRef<'static>,
    pub string: NamedNodeRef<'static>,
}

impl XSD {
    pub const fn new() -> Self {
        XSD {
            boolean: NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#boolean"),
            date: NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#date"),
            date_time: NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#dateTime"),
            decimal: NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#decimal"),
            double: NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#double"),
            integer: NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#integer"),
            string: NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#string"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::vocab::{rdf, rdfs, xsd};

    #[test]
    fn standard_terms_match_oxigraph_vocabulary() {
        let r = RDF::new();
        assert_eq!(r.type_, rdf::TYPE);
        assert_eq!(r.first, rdf::FIRST);
        assert_eq!(r.rest, rdf::REST);
        assert_eq!(r.nil, rdf::NIL);
        assert_eq!(RDFS::new().sub_class_of, rdfs::SUB_CLASS_OF);
        assert_eq!(RDFS::new().label, rdfs::LABEL);
        let x = XSD::new();
        assert_eq!(x.boolean, xsd::BOOLEAN);
        assert_eq!(x.integer, xsd::INTEGER);
        assert_eq!(x.decimal, xsd::DECIMAL);
        assert_eq!(x.date_time, xsd::DATE_TIME);
        assert_eq!(x.date, xsd::DATE);
    }
}
