//! The itinerary request sent to the text-generation service and the
//! answer it returns.
//!
//! The service itself is a black box behind [`ItineraryGenerator`]; this
//! module only shapes the prompt and the response.

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const INTERESTS: &[&str] = &[
    "Praias", "Gastronomia", "Cultura", "Natureza", "Fotografia", "Turismo", "Esportes", "Lazer",
];

pub const TRIP_DURATIONS: &[(&str, &str)] = &[
    ("1", "1 dia"),
    ("2", "2 dias"),
    ("3", "3 dias"),
    ("4", "4 dias"),
    ("5", "5 dias"),
    ("6", "6 dias"),
    ("7", "7 dias ou mais"),
];

pub const LODGING_NEIGHBORHOODS: &[&str] = &[
    "Copacabana", "Ipanema", "Leblon", "Lapa", "Centro", "Flamengo", "Botafogo",
    "Barra da Tijuca", "Outro",
];

pub const LODGING_TYPES: &[&str] = &["Hotel", "Airbnb", "Pousada", "Hostel", "Casa de Amigos"];

pub const GROUP_COMPOSITION: &[&str] = &["Sozinho", "Casal", "Família", "Amigos", "Grupo"];

pub const ACCESSIBILITY_OPTIONS: &[&str] =
    &["Não", "Mobilidade reduzida", "Deficiência visual", "Outra"];

/// (id, description)
pub const TRAVEL_PACING: &[(&str, &str)] = &[
    ("Relaxado", "poucos compromissos"),
    ("Moderado", "equilibrado"),
    ("Intenso", "máximo de atividades"),
];

/// (id, description)
pub const DAILY_BUDGETS: &[(&str, &str)] = &[
    ("R$ 50-100", "econômico"),
    ("R$ 100-200", "moderado"),
    ("R$ 200-300", "confortável"),
    ("R$ 300+", "premium"),
];

pub const TRANSPORT_OPTIONS: &[&str] = &["Metrô", "Ônibus", "Táxi", "Uber", "Carro alugado", "A pé"];

pub const MEAL_OPTIONS: &[&str] = &["Café da manhã", "Almoço", "Café da tarde", "Jantar"];

/// Landmarks every itinerary includes regardless of interests.
pub const MANDATORY_STOPS: &[&str] = &["Cristo Redentor", "Pão de Açúcar"];

/// What the traveller filled in on the trip form. Field names on the wire
/// follow the form's JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "duracao_dias")]
    pub duration_days: String,
    #[serde(rename = "data_inicio")]
    pub start_date: String,
    #[serde(rename = "bairro_hospedagem")]
    pub lodging_neighborhood: String,
    #[serde(rename = "tipo_hospedagem")]
    pub lodging_type: String,
    #[serde(rename = "composicao_grupo", default)]
    pub group_composition: Vec<String>,
    #[serde(rename = "idade_minima")]
    pub min_age: String,
    #[serde(rename = "idade_maxima")]
    pub max_age: String,
    #[serde(rename = "acessibilidade_pcd")]
    pub accessibility: String,
    #[serde(rename = "interesses_principais", default)]
    pub interests: Vec<String>,
    #[serde(rename = "ritmo_viagem")]
    pub pacing: String,
    #[serde(rename = "orcamento_diario")]
    pub daily_budget: String,
    #[serde(rename = "meio_transporte", default)]
    pub transport: Vec<String>,
    #[serde(rename = "fazer_refeicoes_em_casa")]
    pub home_meals: String,
    #[serde(rename = "refeicoes_em_casa_frequencia", default)]
    pub home_meal_kinds: Vec<String>,
    #[serde(rename = "otimizar_tempo")]
    pub optimize_time: String,
    #[serde(rename = "passagem_comprada", default, skip_serializing_if = "Option::is_none")]
    pub ticket_bought: Option<String>,
    #[serde(rename = "horario_chegada", default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(rename = "horario_voo_volta", default, skip_serializing_if = "Option::is_none")]
    pub return_flight_time: Option<String>,
    #[serde(rename = "tipo_transporte_principal", default, skip_serializing_if = "Option::is_none")]
    pub main_transport: Option<String>,
    #[serde(rename = "tem_bebe", default, skip_serializing_if = "Option::is_none")]
    pub has_baby: Option<String>,
    #[serde(rename = "horario_sono_bebe", default, skip_serializing_if = "Option::is_none")]
    pub baby_sleep_schedule: Option<String>,
    #[serde(rename = "criar_roteiro_conforme_bebe", default, skip_serializing_if = "Option::is_none")]
    pub plan_around_baby: Option<String>,
}

impl PreferenceRecord {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    fn wants_home_meals(&self) -> bool {
        self.home_meals.eq_ignore_ascii_case("sim")
    }
}

fn describe<'a>(table: &[(&str, &'a str)], id: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == id).map(|(_, d)| *d)
}

fn with_description(table: &[(&str, &str)], id: &str) -> String {
    match describe(table, id) {
        Some(d) => format!("{id} ({d})"),
        None => id.to_string(),
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Renders the preference record as the generation prompt.
pub fn build_prompt(prefs: &PreferenceRecord) -> String {
    let duration = describe(TRIP_DURATIONS, &prefs.duration_days)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} dias", prefs.duration_days));
    let home_meals = if prefs.wants_home_meals() {
        join_or_dash(&prefs.home_meal_kinds)
    } else {
        "não".to_string()
    };

    let mut lines = vec![
        format!(
            "Crie um roteiro de viagem detalhado, dia a dia, para o Rio de Janeiro para {}.",
            prefs.name
        ),
        String::new(),
        format!("- Duração: {duration}"),
        format!("- Início: {}", prefs.start_date),
        format!(
            "- Hospedagem: {} em {}",
            prefs.lodging_type, prefs.lodging_neighborhood
        ),
        format!("- Grupo: {}", join_or_dash(&prefs.group_composition)),
        format!("- Faixa etária: {} a {} anos", prefs.min_age, prefs.max_age),
        format!("- Acessibilidade: {}", prefs.accessibility),
        format!("- Interesses: {}", join_or_dash(&prefs.interests)),
        format!("- Ritmo: {}", with_description(TRAVEL_PACING, &prefs.pacing)),
        format!(
            "- Orçamento diário: {}",
            with_description(DAILY_BUDGETS, &prefs.daily_budget)
        ),
        format!("- Transporte: {}", join_or_dash(&prefs.transport)),
        format!("- Refeições em casa: {home_meals}"),
        format!("- Otimizar tempo: {}", prefs.optimize_time),
    ];

    let optional = [
        ("Passagem comprada", &prefs.ticket_bought),
        ("Horário de chegada", &prefs.arrival_time),
        ("Horário do voo de volta", &prefs.return_flight_time),
        ("Transporte principal", &prefs.main_transport),
        ("Viaja com bebê", &prefs.has_baby),
        ("Horário de sono do bebê", &prefs.baby_sleep_schedule),
        ("Adaptar o roteiro ao bebê", &prefs.plan_around_baby),
    ];
    lines.extend(optional.into_iter().filter_map(|(label, value)| {
        value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(|v| format!("- {label}: {v}"))
    }));

    lines.push(String::new());
    lines.push(format!(
        "O roteiro deve obrigatoriamente incluir {}.",
        MANDATORY_STOPS.join(" e ")
    ));
    lines.push(
        "Inclua horários sugeridos, deslocamentos, custos estimados e dicas de restaurantes."
            .to_string(),
    );
    lines.join("\n")
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceCitation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uri: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedItinerary {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<SourceCitation>,
}

impl GeneratedItinerary {
    /// Citations worth showing, as (label, uri). Entries without a URI are
    /// dropped; an untitled entry is labelled with its URI.
    pub fn display_sources(&self) -> Vec<(&str, &str)> {
        self.sources
            .iter()
            .filter(|s| !s.uri.trim().is_empty())
            .map(|s| {
                let label = s
                    .title
                    .as_deref()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or(s.uri.as_str());
                (label, s.uri.as_str())
            })
            .collect()
    }
}

/// The external text-generation service.
pub trait ItineraryGenerator {
    fn generate(&self, prompt: &str) -> Result<GeneratedItinerary, Error>;
}

impl<F> ItineraryGenerator for F
where
    F: Fn(&str) -> Result<GeneratedItinerary, Error>,
{
    fn generate(&self, prompt: &str) -> Result<GeneratedItinerary, Error> {
        self(prompt)
    }
}

/// Asks the generator once. Any failure, including an empty answer, comes
/// back as [`Error::Generation`].
pub fn request_itinerary(
    generator: &dyn ItineraryGenerator,
    prefs: &PreferenceRecord,
) -> Result<GeneratedItinerary, Error> {
    let prompt = build_prompt(prefs);
    log::debug!("Requesting itinerary ({} prompt chars)", prompt.chars().count());

    let result = match generator.generate(&prompt) {
        Ok(it) if it.text.trim().is_empty() => Err(Error::Generation("empty response".into())),
        Ok(it) => Ok(it),
        Err(Error::Generation(msg)) => Err(Error::Generation(msg)),
        Err(e) => Err(Error::Generation(e.to_string())),
    };

    match &result {
        Ok(it) => log::info!(
            "Itinerary generated: {} chars, {} source(s)",
            it.text.chars().count(),
            it.sources.len()
        ),
        Err(e) => log::error!("Itinerary generation failed: {e}"),
    }
    result
}
