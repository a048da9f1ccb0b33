#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobParameterType {
    ChoiceParameterDefinition,
    BooleanParameterDefinition,
    StringParameterDefinition,
    PasswordParameterDefinition,
    FileParameterDefinition,
    TextParameterDefinition,
    RunParameterDefinition,
    ListSubversionTagsParameterDefinition,
}

const PARAMETER_TYPES: &[(&str, JobParameterType)] = &[
    ("ChoiceParameterDefinition", JobParameterType::ChoiceParameterDefinition),
    ("BooleanParameterDefinition", JobParameterType::BooleanParameterDefinition),
    ("StringParameterDefinition", JobParameterType::StringParameterDefinition),
    ("PasswordParameterDefinition", JobParameterType::PasswordParameterDefinition),
    ("FileParameterDefinition", JobParameterType::FileParameterDefinition),
    ("TextParameterDefinition", JobParameterType::TextParameterDefinition),
    ("RunParameterDefinition", JobParameterType::RunParameterDefinition),
    (
        "ListSubversionTagsParameterDefinition",
        JobParameterType::ListSubversionTagsParameterDefinition,
    ),
];

impl JobParameterType {
    /// Jenkins reports the definition class name; anything we don't know is `None`.
    pub fn from_name(name: &str) -> Option<JobParameterType> {
        PARAMETER_TYPES
            .iter()
            .find(|&&(known, _)| known == name)
            .map(|&(_, parameter_type)| parameter_type)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobParameterDefinition {
    pub name: String,
    pub description: Option<String>,
    pub parameter_type: Option<JobParameterType>,
    pub default_value: Option<String>,
    pub choices: Vec<String>,
}

impl JobParameterDefinition {
    pub fn new(name: &str, parameter_type: &str, default_value: Option<&str>, choices: &[&str]) -> JobParameterDefinition {
        JobParameterDefinition {
            name: name.to_string(),
            description: None,
            parameter_type: JobParameterType::from_name(parameter_type),
            default_value: default_value.map(|v| v.to_string()),
            choices: choices.iter().map(|c| c.to_string()).collect(),
        }
    }
}
