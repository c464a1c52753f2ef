//! Minimal headless browser for the server-rendered administration page.
//!
//! Pages are fetched with `reqwest` and parsed with `scraper`. The browser
//! keeps its own copy of the form controls (text inputs and dropdowns) so
//! steps can type into fields and pick options; pressing a button submits the
//! enclosing form the way a real browser would (every named control plus the
//! pressed button's `name=value`), then loads the returned page.

use anyhow::{anyhow, bail, Context, Result};
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Control {
    Text {
        value: String,
    },
    Select {
        /// `(value, visible text)` in document order.
        options: Vec<(String, String)>,
        selected: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    id: String,
    name: String,
    control: Control,
}

#[derive(Debug, Default)]
pub struct Browser {
    client: reqwest::Client,
    url: Option<reqwest::Url>,
    html: String,
    /// Form controls in document order.
    fields: Vec<Field>,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css}: {e:?}"))
}

fn by_id(id: &str) -> Result<Selector> {
    selector(&format!("[id=\"{id}\"]"))
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(el: ElementRef<'_>) -> String {
    normalize(&el.text().collect::<String>())
}

impl Browser {
    pub async fn visit(&mut self, url: &str) -> Result<()> {
        let url = reqwest::Url::parse(url).with_context(|| format!("bad url {url}"))?;
        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let html = res.text().await?;
        self.load(url, html)
    }

    fn load(&mut self, url: reqwest::Url, html: String) -> Result<()> {
        let fields = parse_fields(&Html::parse_document(&html))?;
        self.url = Some(url);
        self.html = html;
        self.fields = fields;
        Ok(())
    }

    fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }

    pub fn title(&self) -> Result<String> {
        let doc = self.document();
        let title = doc
            .select(&selector("title")?)
            .next()
            .map(element_text)
            .unwrap_or_default();
        Ok(title)
    }

    pub fn body_text(&self) -> Result<String> {
        let doc = self.document();
        let body = doc
            .select(&selector("body")?)
            .next()
            .map(element_text)
            .unwrap_or_default();
        Ok(body)
    }

    /// Visible text of the element with this id.
    pub fn text_of(&self, id: &str) -> Result<String> {
        let doc = self.document();
        let el = doc
            .select(&by_id(id)?)
            .next()
            .with_context(|| format!("no element with id {id}"))?;
        Ok(element_text(el))
    }

    fn field(&self, id: &str) -> Result<&Field> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .with_context(|| format!("no form field with id {id}"))
    }

    fn field_mut(&mut self, id: &str) -> Result<&mut Field> {
        self.fields
            .iter_mut()
            .find(|f| f.id == id)
            .with_context(|| format!("no form field with id {id}"))
    }

    /// Current value of a control (the selected option's value for dropdowns).
    pub fn value_of(&self, id: &str) -> Result<String> {
        Ok(match &self.field(id)?.control {
            Control::Text { value } => value.clone(),
            Control::Select { options, selected } => options
                .get(*selected)
                .map(|(value, _)| value.clone())
                .unwrap_or_default(),
        })
    }

    /// Clear a text input and type `text` into it.
    pub fn type_into(&mut self, id: &str, text: &str) -> Result<()> {
        match &mut self.field_mut(id)?.control {
            Control::Text { value } => {
                *value = text.to_string();
                Ok(())
            }
            Control::Select { .. } => bail!("{id} is a dropdown, not a text field"),
        }
    }

    pub fn select_by_visible_text(&mut self, id: &str, text: &str) -> Result<()> {
        match &mut self.field_mut(id)?.control {
            Control::Select { options, selected } => {
                let index = options
                    .iter()
                    .position(|(_, label)| label == text)
                    .with_context(|| format!("{id} has no option {text:?}"))?;
                *selected = index;
                Ok(())
            }
            Control::Text { .. } => bail!("{id} is a text field, not a dropdown"),
        }
    }

    /// Visible text of the selected option.
    pub fn selected_text(&self, id: &str) -> Result<String> {
        match &self.field(id)?.control {
            Control::Select { options, selected } => Ok(options
                .get(*selected)
                .map(|(_, label)| label.clone())
                .unwrap_or_default()),
            Control::Text { .. } => bail!("{id} is a text field, not a dropdown"),
        }
    }

    /// Press a submit button and load the resulting page.
    pub async fn click(&mut self, button_id: &str) -> Result<()> {
        let (action, form_data) = self.submission(button_id)?;
        let res = self
            .client
            .post(action.clone())
            .form(&form_data)
            .send()
            .await
            .with_context(|| format!("POST {action}"))?;
        let html = res.text().await?;
        self.load(action, html)
    }

    fn submission(&self, button_id: &str) -> Result<(reqwest::Url, Vec<(String, String)>)> {
        let base = self.url.clone().context("no page loaded")?;
        let doc = self.document();
        let button = doc
            .select(&by_id(button_id)?)
            .next()
            .with_context(|| format!("no button with id {button_id}"))?;

        let form = button
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "form")
            .with_context(|| format!("button {button_id} is not inside a form"))?;
        let action = base.join(form.value().attr("action").unwrap_or(""))?;

        let mut data: Vec<(String, String)> = Vec::new();
        for field in &self.fields {
            if field.name.is_empty() {
                continue;
            }
            data.push((field.name.clone(), self.value_of(&field.id)?));
        }
        if let Some(name) = button.value().attr("name") {
            let value = button.value().attr("value").unwrap_or_default();
            data.push((name.to_string(), value.to_string()));
        }
        Ok((action, data))
    }
}

fn parse_fields(doc: &Html) -> Result<Vec<Field>> {
    let controls = selector("input[id], select[id]")?;
    let option_sel = selector("option")?;

    let mut fields = Vec::new();
    for el in doc.select(&controls) {
        let attrs = el.value();
        let id = attrs.attr("id").unwrap_or_default().to_string();
        let name = attrs.attr("name").unwrap_or_default().to_string();

        let control = if attrs.name() == "select" {
            let mut options = Vec::new();
            let mut selected = 0;
            for (index, opt) in el.select(&option_sel).enumerate() {
                let label = element_text(opt);
                let value = opt.value().attr("value").map_or_else(|| label.clone(), str::to_string);
                if opt.value().attr("selected").is_some() {
                    selected = index;
                }
                options.push((value, label));
            }
            Control::Select { options, selected }
        } else {
            Control::Text {
                value: attrs.attr("value").unwrap_or_default().to_string(),
            }
        };

        fields.push(Field { id, name, control });
    }
    Ok(fields)
}
