//! Built-in subject and topic keyword tables.

use std::collections::HashMap;

use super::KeywordVocabulary;

const SUBJECTS: &[(&str, &[&str])] = &[
    (
        "physics",
        &[
            "velocity", "acceleration", "force", "energy", "momentum", "mass", "electric",
            "magnetic", "wave", "frequency", "wavelength", "photon", "quantum", "nuclear",
            "atom", "electron", "proton", "neutron", "circuit", "voltage", "current",
            "resistance", "capacitor", "motion", "gravity", "friction", "pressure",
            "temperature", "thermodynamics", "optics", "lens", "mirror", "refraction",
            "kinetic", "potential", "joule", "watt", "newton", "coulomb",
        ],
    ),
    (
        "chemistry",
        &[
            "atom", "molecule", "compound", "element", "reaction", "bond", "acid", "base",
            "pH", "oxidation", "reduction", "catalyst", "organic", "inorganic", "alkane",
            "alkene", "alkyne", "benzene", "electron", "ion", "cation", "anion", "isotope",
            "mole", "solution", "solvent", "solute", "concentration", "molarity", "periodic",
            "valency", "electronegativity", "hybridization", "equilibrium", "stoichiometry",
            "enthalpy", "entropy",
        ],
    ),
    (
        "biology",
        &[
            "cell", "DNA", "RNA", "gene", "protein", "enzyme", "chromosome", "mitochondria",
            "chloroplast", "nucleus", "ribosome", "membrane", "photosynthesis", "respiration",
            "metabolism", "glycolysis", "mitosis", "meiosis", "tissue", "organ", "blood",
            "heart", "nervous", "brain", "hormone", "reproduction", "evolution", "bacteria",
            "virus", "fungi", "plant", "animal", "species", "ecosystem", "genetics",
            "mutation", "allele", "phenotype",
        ],
    ),
    (
        "mathematics",
        &[
            "equation", "function", "derivative", "integral", "limit", "matrix",
            "determinant", "vector", "trigonometry", "logarithm", "polynomial", "quadratic",
            "linear", "parabola", "hyperbola", "probability", "statistics", "mean", "median",
            "variance", "sequence", "series", "geometric", "arithmetic", "permutation",
            "combination", "binomial", "cosine", "sine", "tangent", "complex", "imaginary",
            "real", "rational", "irrational",
        ],
    ),
    (
        "english",
        &[
            "grammar", "vocabulary", "synonym", "antonym", "sentence", "noun", "verb",
            "adjective", "adverb", "pronoun", "tense", "preposition", "conjunction", "article",
            "comprehension", "passage", "meaning", "context",
        ],
    ),
];

type TopicTable = &'static [(&'static str, &'static [&'static str])];

const TOPICS: &[(&str, TopicTable)] = &[
    (
        "physics",
        &[
            ("circular_motion", &["centripetal", "tangential", "angular", "circular", "radius"]),
            (
                "waves",
                &["wave", "frequency", "wavelength", "sound", "doppler", "interference", "diffraction"],
            ),
            (
                "electricity",
                &["electric", "current", "voltage", "charge", "circuit", "resistance", "capacitor"],
            ),
            (
                "mechanics",
                &["force", "velocity", "acceleration", "motion", "momentum", "friction", "mass"],
            ),
            ("optics", &["light", "lens", "reflection", "refraction", "mirror", "optical"]),
            (
                "thermodynamics",
                &["heat", "temperature", "thermal", "isothermal", "adiabatic", "entropy"],
            ),
            ("magnetism", &["magnetic", "flux", "induction", "magnet"]),
            (
                "modern_physics",
                &["quantum", "photon", "nuclear", "radioactive", "atom", "electron"],
            ),
        ],
    ),
    (
        "chemistry",
        &[
            ("atomic_structure", &["atom", "electron", "orbital", "quantum number", "shell"]),
            ("bonding", &["bond", "covalent", "ionic", "metallic", "hybridization"]),
            (
                "organic",
                &[
                    "alkane", "alkene", "alkyne", "benzene", "aromatic", "functional group",
                    "hydrocarbon",
                ],
            ),
            ("acids_bases", &["acid", "base", "pH", "buffer", "neutralization"]),
            ("reactions", &["reaction", "oxidation", "reduction", "redox", "catalyst"]),
            ("periodic_table", &["periodic", "group", "period", "alkali", "halogen"]),
            ("thermochemistry", &["enthalpy", "entropy", "exothermic", "endothermic"]),
        ],
    ),
    (
        "mathematics",
        &[
            (
                "calculus",
                &[
                    "derivative", "integral", "limit", "differentiation", "integration",
                    "antiderivative",
                ],
            ),
            (
                "trigonometry",
                &["sine", "cosine", "tangent", "secant", "cosecant", "cotangent", "inverse"],
            ),
            (
                "probability",
                &[
                    "probability", "dice", "sample space", "event", "outcome", "permutation",
                    "combination",
                ],
            ),
            ("algebra", &["equation", "polynomial", "roots", "function", "quadratic", "linear"]),
            ("geometry", &["circle", "parabola", "ellipse", "hyperbola", "coordinate", "distance"]),
            ("sequences", &["sequence", "series", "arithmetic", "geometric", "progression"]),
            ("sets", &["set", "subset", "union", "intersection", "complement"]),
            ("complex_numbers", &["complex", "imaginary", "real", "conjugate"]),
            ("matrices", &["matrix", "determinant", "inverse", "transpose"]),
        ],
    ),
    (
        "biology",
        &[
            ("cell", &["cell", "membrane", "nucleus", "organelle", "cytoplasm", "mitochondria"]),
            (
                "genetics",
                &["DNA", "RNA", "gene", "chromosome", "mutation", "allele", "heredity"],
            ),
            ("metabolism", &["respiration", "photosynthesis", "ATP", "glycolysis", "krebs"]),
            ("evolution", &["evolution", "natural selection", "adaptation", "species"]),
            ("ecology", &["ecosystem", "food chain", "biodiversity"]),
        ],
    ),
    (
        "english",
        &[
            ("grammar", &["grammar", "noun", "verb", "adjective", "tense", "sentence"]),
            ("vocabulary", &["synonym", "antonym", "meaning", "vocabulary"]),
        ],
    ),
];

/// Subject vocabulary in declaration order.
#[must_use]
pub fn default_subjects() -> KeywordVocabulary {
    SUBJECTS
        .iter()
        .fold(KeywordVocabulary::new(), |vocab, (label, keywords)| {
            vocab.with_entry(label, keywords.iter().copied())
        })
}

/// Topic vocabularies keyed by subject label.
#[must_use]
pub fn default_topics() -> HashMap<String, KeywordVocabulary> {
    TOPICS
        .iter()
        .map(|(subject, topics)| {
            let vocab = topics
                .iter()
                .fold(KeywordVocabulary::new(), |vocab, (label, keywords)| {
                    vocab.with_entry(label, keywords.iter().copied())
                });
            ((*subject).to_string(), vocab)
        })
        .collect()
}
