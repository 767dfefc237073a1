//! Bundled validation message tables.

pub(crate) const EN_US: &str = "en_US";
pub(crate) const MK_MK: &str = "mk_MK";

pub(crate) fn tables() -> [(&'static str, &'static [(&'static str, &'static str)]); 2] {
    [(EN_US, EN_US_VALIDATION), (MK_MK, MK_MK_VALIDATION)]
}

const EN_US_VALIDATION: &[(&str, &str)] = &[
    ("invalid_rule", "Invalid validation rule used: %s"),
    ("unknown_error", "Unknown validation error while validating the %s field."),
    ("required", "The %s field is required."),
    ("min_length", "The %s field must be at least %d characters long."),
    ("max_length", "The %s field must be %d characters or fewer."),
    ("exact_length", "The %s field must be exactly %d characters."),
    ("in_array", "The %s field must be selected from the options listed."),
    ("matches", "The %s field must match the %s field."),
    ("valid_url", "The %s field must contain a valid URL."),
    ("valid_email", "The %s field must contain a valid email address."),
    ("valid_ip", "The %s field must contain a valid IP address."),
    ("valid_type", "The %s field must only contain %s characters."),
    ("range", "The %s field must be between specified ranges."),
    ("regex", "The %s field does not match accepted input."),
    ("depends_on", "The %s field depends on the %s field."),
    ("user_aborted", "The %s file was aborted during upload."),
    ("invalid_type", "The %s file is not an allowed file type."),
    ("max_size", "The %s file you uploaded was too large. The maximum size allowed is %s."),
    ("max_width", "The %s file you uploaded was too big. The maximum allowed width is %s, yours is %spx."),
    ("max_height", "The %s file you uploaded was too big. The maximum allowed height is %s, yours is %spx."),
    ("min_width", "The %s file you uploaded was too small. The minimum allowed width is %spx."),
    ("min_height", "The %s file you uploaded was too small. The minimum allowed height is %spx."),
    ("alpha", "alphabetical"),
    ("alpha_numeric", "alphabetical and numeric"),
    ("alpha_dash", "alphabetical, dash, and underscore"),
    ("digit", "digit"),
    ("numeric", "numeric"),
];

const MK_MK_VALIDATION: &[(&str, &str)] = &[
    ("invalid_rule", "Користено е невалидно правило за валидирање: %s"),
    ("unknown_error", "Непозната грешка при валидирање на полето: %s."),
    ("required", "Полето %s е задолжително."),
    ("min_length", "Полето %s мора да е долго најмалку %d карактера."),
    ("max_length", "Полето %s мора да е долго %d карактера или помалку."),
    ("exact_length", "Полето %s мора да е точно %d карактера."),
    ("in_array", "Полето %s мора да е селектирано од листата со опции."),
    ("matches", "Полето %s мора да е исто со полето %s."),
    ("valid_url", "Полето %s мора да содржи валидно URL."),
    ("valid_email", "Полето %s мора да содржи валидна емаил адреса."),
    ("valid_ip", "Полето %s мора да содржи валидна IP адреса."),
    ("valid_type", "Полето %s мора да содржи само %s карактери."),
    ("range", "Полето %s мора да е помеѓу дефинираниот опсег."),
    ("regex", "Полето %s не содржи прифатлива вредност."),
    ("depends_on", "Полето %s е зависно од полето %s."),
    ("user_aborted", "Датотеката %s е прекината при испраќање."),
    ("invalid_type", "Датотеката %s не е од валиден тип."),
    ("max_size", "Датотеката %s која е испратена е преголема. Максимум дозволена големина е %s."),
    ("max_width", "Датотеката %s има максимум дозволена ширина од %s и е %spx."),
    ("max_height", "Датотеката %s има максимум дозволена висина од %s и е %spx."),
    ("min_width", "Качената датотеката %s е премногу мала. Минимум дозволената ширина е %spx."),
    ("min_height", "Качената датотеката %s е премногу мала. Минимум дозволената висина е %spx."),
    ("alpha", "alphabetical"),
    ("alpha_numeric", "alphabetical and numeric"),
    ("alpha_dash", "alphabetical, dash, and underscore"),
    ("digit", "digit"),
    ("numeric", "numeric"),
];
