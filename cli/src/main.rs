use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use oxigraph::io::RdfFormat;
use oxigraph::model::{Graph, Literal};
use serde_json::{json, Value as Json};
use shacl_objects::shapes::{
    NodeShape, NodeShapeFilter, Object, ObjectFilter, Ontology, OntologyFilter, PropertyGroup,
    PropertyGroupFilter, PropertyShape, PropertyShapeFilter, ShaclmateNodeShape,
    ShaclmateNodeShapeFilter, ShaclmatePropertyShape, ShaclmatePropertyShapeFilter, Shape,
    ShapeFilter,
};
use shacl_objects::{
    parse_identifier, read_graph, write_graph, CollectionFilter, GraphBuilder, LiteralFilter,
    ObjectSet, ObjectType, Query, RandomBlankNodeGenerator, RecordFilter,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the base log level (use -v / -q to adjust relative to this level)
    #[arg(
        long,
        value_enum,
        default_value_t = LogLevel::Info,
        global = true,
        help = "error | warn | info | debug | trace"
    )]
    log_level: LogLevel,

    /// Increase logging verbosity (can be used multiple times)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease logging verbosity (can be used multiple times)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn init_logging(base: LogLevel, verbose: u8, quiet: u8) {
    env_logger::Builder::from_default_env()
        .format_target(false)
        .filter_level(adjusted_level(base, verbose, quiet))
        .init();
}

/// `base` moved up one level per `-v` and down one per `-q`, within Error..=Trace.
fn adjusted_level(base: LogLevel, verbose: u8, quiet: u8) -> LevelFilter {
    let levels = [
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];

    let base_idx = levels
        .iter()
        .position(|lvl| *lvl == base.to_filter())
        .unwrap_or(2) as i16; // default to Info
    let adjusted = (base_idx + i16::from(verbose) - i16::from(quiet))
        .clamp(0, (levels.len() - 1) as i16) as usize;
    levels[adjusted]
}

#[derive(Subcommand)]
enum Commands {
    /// List the objects of a kind, filtered and paginated
    List(ListArgs),
    /// Count the objects of a kind that match the filter
    Count(SelectionArgs),
    /// Print a single object by identifier
    Get(GetArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Kind {
    NodeShape,
    PropertyShape,
    ShaclmateNodeShape,
    ShaclmatePropertyShape,
    Ontology,
    PropertyGroup,
    /// Node or property shapes
    Shape,
    /// Every kind
    Object,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OutputFormat {
    Json,
    Turtle,
    NTriples,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Path to the RDF file holding the shapes graph
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Kind of object to read
    #[arg(short, long, value_enum, default_value_t = Kind::Object)]
    kind: Kind,
}

#[derive(Args, Debug)]
struct SelectionArgs {
    #[clap(flatten)]
    source: SourceArgs,

    /// Only consider these identifiers (`<iri>`, `_:label` or a bare IRI); repeatable
    #[arg(long = "id", value_name = "IDENTIFIER")]
    ids: Vec<String>,

    /// Only match objects with at least this many rdfs:label values
    #[arg(long, value_name = "N")]
    min_labels: Option<usize>,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[clap(flatten)]
    selection: SelectionArgs,

    /// Maximum number of objects to print
    #[arg(long)]
    limit: Option<usize>,

    /// Number of matching objects to skip
    #[arg(long, default_value_t = 0)]
    offset: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct GetArgs {
    #[clap(flatten)]
    source: SourceArgs,

    /// Identifier of the object (`<iri>`, `_:label` or a bare IRI)
    #[arg(long = "id", value_name = "IDENTIFIER")]
    id: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

/// What the CLI needs from an object kind beyond [`ObjectType`].
trait CliObject: ObjectType {
    /// A filter requiring at least `min` labels wherever the kind has labels.
    fn min_labels_filter(min: usize) -> Self::Filter;

    fn describe(&self) -> Json;
}

fn labels_at_least(min: usize) -> CollectionFilter<LiteralFilter> {
    CollectionFilter::count(Some(min), None)
}

fn literals(values: &[Literal]) -> Json {
    values.iter().map(|l| json!(l.value())).collect()
}

fn header<T: ObjectType>(object: &T) -> serde_json::Map<String, Json> {
    let mut map = serde_json::Map::new();
    map.insert("identifier".into(), json!(object.identifier().to_string()));
    map.insert("kind".into(), json!(object.kind().as_str()));
    map
}

fn describe_node_shape(shape: &NodeShape, map: &mut serde_json::Map<String, Json>) {
    map.insert("labels".into(), literals(&shape.base.labels));
    map.insert("comments".into(), literals(&shape.base.comments));
    map.insert("closed".into(), json!(shape.closed));
    map.insert(
        "properties".into(),
        shape.properties.iter().map(|p| json!(p.to_string())).collect(),
    );
}

fn describe_property_shape(shape: &PropertyShape, map: &mut serde_json::Map<String, Json>) {
    map.insert("labels".into(), literals(&shape.base.labels));
    map.insert("names".into(), literals(&shape.names));
    map.insert("path".into(), json!(shape.path.to_sparql_path()));
    map.insert("min_count".into(), json!(shape.base.min_count));
    map.insert("max_count".into(), json!(shape.base.max_count));
    map.insert("order".into(), json!(shape.order));
}

impl CliObject for NodeShape {
    fn min_labels_filter(min: usize) -> NodeShapeFilter {
        let mut filter = NodeShapeFilter::default();
        filter.base.labels = labels_at_least(min);
        filter
    }

    fn describe(&self) -> Json {
        let mut map = header(self);
        describe_node_shape(self, &mut map);
        Json::Object(map)
    }
}

impl CliObject for PropertyShape {
    fn min_labels_filter(min: usize) -> PropertyShapeFilter {
        let mut filter = PropertyShapeFilter::default();
        filter.base.labels = labels_at_least(min);
        filter
    }

    fn describe(&self) -> Json {
        let mut map = header(self);
        describe_property_shape(self, &mut map);
        Json::Object(map)
    }
}

impl CliObject for ShaclmateNodeShape {
    fn min_labels_filter(min: usize) -> ShaclmateNodeShapeFilter {
        ShaclmateNodeShapeFilter {
            node_shape: NodeShape::min_labels_filter(min),
            ..Default::default()
        }
    }

    fn describe(&self) -> Json {
        let mut map = header(self);
        describe_node_shape(&self.node_shape, &mut map);
        map.insert("name".into(), json!(self.name));
        map.insert("abstract".into(), json!(self.abstract_));
        map.insert(
            "rdf_type".into(),
            json!(self.rdf_type.as_ref().map(|t| t.as_str())),
        );
        Json::Object(map)
    }
}

impl CliObject for ShaclmatePropertyShape {
    fn min_labels_filter(min: usize) -> ShaclmatePropertyShapeFilter {
        ShaclmatePropertyShapeFilter {
            property_shape: PropertyShape::min_labels_filter(min),
            ..Default::default()
        }
    }

    fn describe(&self) -> Json {
        let mut map = header(self);
        describe_property_shape(&self.property_shape, &mut map);
        map.insert("name".into(), json!(self.name));
        map.insert(
            "visibility".into(),
            json!(self.visibility.map(|v| v.named_node().as_str())),
        );
        Json::Object(map)
    }
}

impl CliObject for Ontology {
    fn min_labels_filter(min: usize) -> OntologyFilter {
        OntologyFilter {
            labels: labels_at_least(min),
            ..Default::default()
        }
    }

    fn describe(&self) -> Json {
        let mut map = header(self);
        map.insert("labels".into(), literals(&self.labels));
        map.insert("comments".into(), literals(&self.comments));
        map.insert(
            "version_iri".into(),
            json!(self.version_iri.as_ref().map(|v| v.as_str())),
        );
        Json::Object(map)
    }
}

impl CliObject for PropertyGroup {
    fn min_labels_filter(min: usize) -> PropertyGroupFilter {
        PropertyGroupFilter {
            labels: labels_at_least(min),
            ..Default::default()
        }
    }

    fn describe(&self) -> Json {
        let mut map = header(self);
        map.insert("labels".into(), literals(&self.labels));
        map.insert("comments".into(), literals(&self.comments));
        Json::Object(map)
    }
}

impl CliObject for Shape {
    fn min_labels_filter(min: usize) -> ShapeFilter {
        ShapeFilter {
            on_node_shape: Some(NodeShape::min_labels_filter(min)),
            on_property_shape: Some(PropertyShape::min_labels_filter(min)),
            ..Default::default()
        }
    }

    fn describe(&self) -> Json {
        match self {
            Shape::NodeShape(shape) => shape.describe(),
            Shape::PropertyShape(shape) => shape.describe(),
        }
    }
}

impl CliObject for Object {
    fn min_labels_filter(min: usize) -> ObjectFilter {
        ObjectFilter {
            on_shaclmate_node_shape: Some(ShaclmateNodeShape::min_labels_filter(min)),
            on_shaclmate_property_shape: Some(ShaclmatePropertyShape::min_labels_filter(min)),
            on_node_shape: Some(NodeShape::min_labels_filter(min)),
            on_property_shape: Some(PropertyShape::min_labels_filter(min)),
            on_ontology: Some(Ontology::min_labels_filter(min)),
            on_property_group: Some(PropertyGroup::min_labels_filter(min)),
            ..Default::default()
        }
    }

    fn describe(&self) -> Json {
        match self {
            Object::ShaclmateNodeShape(object) => object.describe(),
            Object::ShaclmatePropertyShape(object) => object.describe(),
            Object::NodeShape(object) => object.describe(),
            Object::PropertyShape(object) => object.describe(),
            Object::Ontology(object) => object.describe(),
            Object::PropertyGroup(object) => object.describe(),
        }
    }
}

fn build_filter<T: CliObject>(
    args: &SelectionArgs,
) -> Result<T::Filter, Box<dyn std::error::Error>> {
    let filter = match args.min_labels {
        Some(min) => T::min_labels_filter(min),
        None => T::Filter::default(),
    };
    if args.ids.is_empty() {
        return Ok(filter);
    }
    let ids = args
        .ids
        .iter()
        .map(|id| parse_identifier(id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(filter.with_identifiers(ids))
}

fn print_objects<T: CliObject>(
    objects: &[T],
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let rdf_format = match format {
        OutputFormat::Json => {
            let values: Vec<Json> = objects.iter().map(CliObject::describe).collect();
            serde_json::to_writer_pretty(&mut out, &values)?;
            writeln!(out)?;
            return Ok(());
        }
        OutputFormat::Turtle => RdfFormat::Turtle,
        OutputFormat::NTriples => RdfFormat::NTriples,
    };
    // fresh labels so minted list nodes cannot collide with parsed blank nodes
    let mut builder = GraphBuilder::with_generator(RandomBlankNodeGenerator);
    for object in objects {
        object.to_rdf(&mut builder);
    }
    write_graph(builder.graph(), out, rdf_format)?;
    Ok(())
}

fn run_list<T: CliObject>(
    graph: &Graph,
    args: &ListArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut query = Query::new()
        .filter(build_filter::<T>(&args.selection)?)
        .offset(args.offset);
    if let Some(limit) = args.limit {
        query = query.limit(limit);
    }
    let objects: Vec<T> = ObjectSet::new(graph).list(&query)?;
    info!("Listed {} objects", objects.len());
    print_objects(&objects, args.format)
}

fn run_count<T: CliObject>(
    graph: &Graph,
    args: &SelectionArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let count = ObjectSet::new(graph).count::<T>(&build_filter::<T>(args)?)?;
    println!("{}", count);
    Ok(())
}

fn run_get<T: CliObject>(
    graph: &Graph,
    args: &GetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let identifier = parse_identifier(&args.id)?;
    let object: T = ObjectSet::new(graph).get(&identifier)?;
    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&object.describe())?);
            Ok(())
        }
        format => print_objects(&[object], format),
    }
}

/// Runs `$run::<T>` with `T` chosen by the `--kind` value.
macro_rules! dispatch {
    ($kind:expr, $run:ident($($arg:expr),*)) => {
        match $kind {
            Kind::NodeShape => $run::<NodeShape>($($arg),*),
            Kind::PropertyShape => $run::<PropertyShape>($($arg),*),
            Kind::ShaclmateNodeShape => $run::<ShaclmateNodeShape>($($arg),*),
            Kind::ShaclmatePropertyShape => $run::<ShaclmatePropertyShape>($($arg),*),
            Kind::Ontology => $run::<Ontology>($($arg),*),
            Kind::PropertyGroup => $run::<PropertyGroup>($($arg),*),
            Kind::Shape => $run::<Shape>($($arg),*),
            Kind::Object => $run::<Object>($($arg),*),
        }
    };
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.verbose, cli.quiet);

    match cli.command {
        Commands::List(args) => {
            let source = &args.selection.source;
            let graph = read_graph(&source.file)?;
            dispatch!(source.kind, run_list(&graph, &args))
        }
        Commands::Count(args) => {
            let graph = read_graph(&args.source.file)?;
            dispatch!(args.source.kind, run_count(&graph, &args))
        }
        Commands::Get(args) => {
            let graph = read_graph(&args.source.file)?;
            dispatch!(args.source.kind, run_get(&graph, &args))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_flags_clamp_to_the_known_levels() {
        assert_eq!(adjusted_level(LogLevel::Info, 0, 0), LevelFilter::Info);
        assert_eq!(adjusted_level(LogLevel::Info, 1, 0), LevelFilter::Debug);
        assert_eq!(adjusted_level(LogLevel::Info, 0, 2), LevelFilter::Error);
        assert_eq!(adjusted_level(LogLevel::Warn, 200, 0), LevelFilter::Trace);
        assert_eq!(adjusted_level(LogLevel::Warn, 0, 255), LevelFilter::Error);
        assert_eq!(adjusted_level(LogLevel::Debug, 255, 255), LevelFilter::Debug);
    }
}
