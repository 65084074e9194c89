//! Built-in EcoBot catalogs
//!
//! Two authored catalogs ship with the widget. `Full` is the multi-key
//! catalog used by default; `Compact` is the single-phrase catalog of the
//! offline widget. Both are Portuguese and their order is significant.

use super::base::{KnowledgeBase, KnowledgeEntry};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Which built-in catalog to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogVariant {
    /// Multi-key catalog (15 entries)
    #[default]
    Full,
    /// Single-key catalog (16 entries)
    Compact,
}

impl FromStr for CatalogVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(CatalogVariant::Full),
            "compact" => Ok(CatalogVariant::Compact),
            other => Err(format!("Unknown catalog variant: {}", other)),
        }
    }
}

const GREETING: &str = "Olá! Como posso ajudar você hoje? Pode perguntar sobre acidificação dos oceanos, impactos ambientais ou o simulador.";
const HELP: &str = "Posso ajudar com informações sobre acidificação dos oceanos, impactos ambientais, como usar o simulador, ou como você pode contribuir para soluções. Sobre o que quer saber?";
const DEFINITION: &str = "A acidificação dos oceanos é o processo contínuo de redução do pH das águas oceânicas, causado principalmente pela absorção do excesso de dióxido de carbono (CO₂) da atmosfera. Quando o CO₂ se dissolve na água do mar, forma ácido carbônico, liberando íons de hidrogênio que aumentam a acidez da água.";
const SIMULATOR: &str = "Nosso simulador permite visualizar os efeitos da acidificação oceânica em diferentes cenários. Você pode ajustar os níveis de CO₂ e observar as mudanças nos ecossistemas marinhos em tempo real. Quer que eu explique como usar?";
const IMPACTS: &str = "Os impactos da acidificação incluem: enfraquecimento de conchas e esqueletos de organismos marinhos, branqueamento de corais, alterações na cadeia alimentar marinha e redução da biodiversidade oceânica. Quer saber como isso afeta alguma espécie específica?";
const HOW_TO_HELP: &str = "Você pode ajudar reduzindo sua pegada de carbono com ações como diminuir o uso de combustíveis fósseis, apoiar energias renováveis, reduzir o consumo de carne, e participar de iniciativas de conservação marinha. Quer dicas práticas para o dia a dia?";
const CREATORS: &str = "O EcoBot foi criado por uma equipe de cientistas e desenvolvedores comprometidos com a educação ambiental e a preservação dos oceanos.";
const OCEAN_PH: &str = "O pH médio dos oceanos era de aproximadamente 8,2 antes da era industrial. Atualmente, está em torno de 8,1, o que representa um aumento de 30% na acidez (lembrando que a escala de pH é logarítmica). Projeções indicam que pode cair para 7,8 até o final deste século se as emissões de CO₂ continuarem no ritmo atual.";
const CORALS: &str = "Os corais são extremamente sensíveis à acidificação dos oceanos. O pH mais baixo dificulta a formação de seus esqueletos de carbonato de cálcio e pode levar ao branqueamento. Além disso, a acidificação combinada com o aquecimento dos oceanos cria um \"efeito duplo\" devastador para os recifes de coral.";
const SOLUTIONS: &str = "As principais soluções para a acidificação dos oceanos envolvem: redução das emissões globais de CO₂, desenvolvimento de energias renováveis, reflorestamento, proteção de ecossistemas marinhos como manguezais e pradarias marinhas (que capturam carbono), e pesquisa de técnicas de restauração de recifes e outros habitats marinhos.";
const OFF_TOPIC_BRAZIL: &str = "Como assistente especializado em acidificação dos oceanos, não tenho informações detalhadas sobre a história do Brasil. Posso ajudar com questões relacionadas aos oceanos, acidificação e impactos ambientais marinhos.";
const BIODIVERSITY: &str = "A acidificação dos oceanos ameaça a biodiversidade marinha de várias formas: afeta organismos que formam conchas ou esqueletos calcários, altera a cadeia alimentar, reduz a capacidade reprodutiva de certas espécies e pode modificar comportamentos dos organismos marinhos. Ecossistemas inteiros, como recifes de coral, que abrigam 25% de toda a vida marinha, estão em risco.";
const ECONOMY: &str = "A acidificação dos oceanos tem impactos econômicos significativos, afetando a pesca comercial, a aquicultura (especialmente de moluscos), o turismo relacionado aos recifes de coral, e aumentando os custos de adaptação e mitigação. Estima-se que os danos econômicos globais possam chegar a trilhões de dólares até o final do século.";
const EXPERIMENTS: &str = "Cientistas realizam diversos experimentos para estudar a acidificação dos oceanos, incluindo: estudos em laboratório com tanques de água do mar em diferentes níveis de pH, instalações de enriquecimento de CO₂ em campo (FOCE - Free Ocean CO₂ Enrichment), monitoramento de áreas com fontes naturais de CO₂ (como respiradouros vulcânicos submarinos), e modelagem computacional de cenários futuros.";
const CO2_IN_SEAWATER: &str = "Quando o dióxido de carbono (CO₂) entra em contato com a água do mar, ele reage formando ácido carbônico, que libera íons de hidrogênio e causa a acidificação da água. Isso prejudica organismos marinhos que dependem do carbonato de cálcio para suas conchas e esqueletos, além de alterar o equilíbrio dos ecossistemas oceânicos.";

const FULL_DEFAULT: &str = "Desculpe, não entendi sua pergunta. Você pode me perguntar sobre acidificação dos oceanos, impactos ambientais, como usar o simulador, ou como ajudar. Sobre o que quer saber?";
const COMPACT_DEFAULT: &str = "Desculpe, não entendi sua pergunta. Posso ajudar com informações sobre acidificação dos oceanos, impactos ambientais ou como usar o simulador.";

static FULL: Lazy<Arc<KnowledgeBase>> = Lazy::new(|| {
    let entries = vec![
        KnowledgeEntry::new(&["oi", "olá", "ola", "ei", "eae"], GREETING),
        KnowledgeEntry::new(
            &["ajuda", "socorro", "me ajuda", "o que você faz", "como funciona"],
            HELP,
        ),
        KnowledgeEntry::new(
            &[
                "o que é acidificação",
                "definição acidificação",
                "acidificação dos oceanos",
                "o que é acidificação dos oceanos",
                "acidificação",
                "definição",
            ],
            DEFINITION,
        ),
        KnowledgeEntry::new(
            &[
                "como funciona o simulador",
                "o que faz o simulador",
                "usar simulador",
                "simulador",
                "simulador de acidificação",
            ],
            SIMULATOR,
        ),
        KnowledgeEntry::new(
            &[
                "quais os impactos",
                "impactos da acidificação",
                "efeitos da acidificação",
                "consequências da acidificação",
                "impactos no oceano",
                "efeitos no oceano",
            ],
            IMPACTS,
        ),
        KnowledgeEntry::new(
            &[
                "como posso ajudar",
                "o que eu posso fazer",
                "como diminuir acidificação",
                "o que fazer para ajudar",
                "como reduzir acidificação",
                "como reduzir co2",
            ],
            HOW_TO_HELP,
        ),
        KnowledgeEntry::new(
            &[
                "quem criou",
                "quem fez",
                "quem desenvolveu",
                "origem do bot",
                "criadores do bot",
            ],
            CREATORS,
        ),
        KnowledgeEntry::new(
            &[
                "ph oceano",
                "qual ph do oceano",
                "nivel de ph",
                "acidez do oceano",
                "qual o ph do mar",
            ],
            OCEAN_PH,
        ),
        KnowledgeEntry::new(
            &[
                "corais",
                "acidificação e corais",
                "como acidificação afeta corais",
                "problemas dos corais",
                "branqueamento dos corais",
            ],
            CORALS,
        ),
        KnowledgeEntry::new(
            &[
                "solução",
                "soluções para acidificação",
                "como resolver acidificação",
                "o que fazer para acidificação",
                "como combater acidificação",
            ],
            SOLUTIONS,
        ),
        KnowledgeEntry::new(
            &[
                "história do brasil",
                "historia do brasil",
                "brasil",
                "informações sobre brasil",
            ],
            OFF_TOPIC_BRAZIL,
        ),
        KnowledgeEntry::new(
            &[
                "biodiversidade",
                "biodiversidade marinha",
                "fauna marinha",
                "flora marinha",
                "vida marinha",
                "impacto na biodiversidade",
            ],
            BIODIVERSITY,
        ),
        KnowledgeEntry::new(
            &[
                "economia",
                "impacto econômico",
                "custo acidificação",
                "prejuízo econômico",
                "pesca e acidificação",
                "turismo e acidificação",
            ],
            ECONOMY,
        ),
        KnowledgeEntry::new(
            &[
                "experimentos",
                "pesquisas acidificação",
                "como estudam acidificação",
                "testes acidificação",
                "estudos acidificação",
            ],
            EXPERIMENTS,
        ),
        KnowledgeEntry::new(
            &[
                "o que o co2 em contato com a água do mar pode causar",
                "co2 contato água do mar",
                "efeito do co2 na água do mar",
                "por que o aumento de co2 na atmosfera faz mal para os oceanos",
                "porque o aumento de co2 faz mal para os oceanos",
            ],
            CO2_IN_SEAWATER,
        ),
    ];
    Arc::new(KnowledgeBase::from_parts(entries, FULL_DEFAULT.to_string()))
});

// The compact catalog shares most answers with the full one but words a few
// of them more briefly. Its default answer is not a keyed entry, so input
// containing "default" (or tokens like "fau" and "ult") still reaches every
// entry below before falling back.
static COMPACT: Lazy<Arc<KnowledgeBase>> = Lazy::new(|| {
    let hello = "Olá! Como posso ajudar você hoje?";
    let entries = vec![
        KnowledgeEntry::new(&["oi"], hello),
        KnowledgeEntry::new(&["olá"], hello),
        KnowledgeEntry::new(
            &["ajuda"],
            "Posso ajudar com informações sobre acidificação dos oceanos, impactos ambientais, como usar o simulador, ou como você pode contribuir para soluções.",
        ),
        KnowledgeEntry::new(
            &["o que é acidificação"],
            "A acidificação dos oceanos é o processo de diminuição do pH da água do mar, causado principalmente pela absorção de dióxido de carbono (CO₂) da atmosfera. Isso afeta organismos marinhos com conchas e esqueletos de carbonato de cálcio, como corais e mariscos.",
        ),
        KnowledgeEntry::new(
            &["como funciona o simulador"],
            "Nosso simulador permite visualizar os efeitos da acidificação oceânica em diferentes cenários. Você pode ajustar os níveis de CO₂ e observar as mudanças nos ecossistemas marinhos em tempo real.",
        ),
        KnowledgeEntry::new(
            &["quais os impactos"],
            "Os impactos da acidificação incluem: enfraquecimento de conchas e esqueletos de organismos marinhos, branqueamento de corais, alterações na cadeia alimentar marinha e redução da biodiversidade oceânica.",
        ),
        KnowledgeEntry::new(
            &["como posso ajudar"],
            "Você pode ajudar reduzindo sua pegada de carbono através de ações como: diminuir o uso de combustíveis fósseis, apoiar energias renováveis, reduzir o consumo de carne, e participar de iniciativas de conservação marinha.",
        ),
        KnowledgeEntry::new(&["quem criou"], CREATORS),
        KnowledgeEntry::new(&["ph oceano"], OCEAN_PH),
        KnowledgeEntry::new(&["corais"], CORALS),
        KnowledgeEntry::new(&["solução"], SOLUTIONS),
        KnowledgeEntry::new(&["história do brasil"], OFF_TOPIC_BRAZIL),
        KnowledgeEntry::new(&["biodiversidade"], BIODIVERSITY),
        KnowledgeEntry::new(&["economia"], ECONOMY),
        KnowledgeEntry::new(&["experimentos"], EXPERIMENTS),
        KnowledgeEntry::new(&["definição"], DEFINITION),
    ];
    Arc::new(KnowledgeBase::from_parts(entries, COMPACT_DEFAULT.to_string()))
});

/// Shared handle to a built-in catalog
pub fn builtin(variant: CatalogVariant) -> Arc<KnowledgeBase> {
    match variant {
        CatalogVariant::Full => FULL.clone(),
        CatalogVariant::Compact => COMPACT.clone(),
    }
}
