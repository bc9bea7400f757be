//! Status page renderer.
//!
//! [`render_page`] is a pure function of its [`PageContext`]: fixed
//! fragments with the live values interpolated. The value box is styled
//! with the current color server-side so the page does not flash the
//! default color before the script's `/api/color` fetch completes.

use core::fmt::Write;
use core::net::Ipv4Addr;

use crate::color::PALETTE;

/// Everything the page shows.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub color: &'a str,
    pub sensor_value: f32,
    pub ap_ip: Ipv4Addr,
    pub ssid: &'a str,
    pub uptime_secs: u64,
    pub free_heap_bytes: u32,
    pub refresh_secs: u32,
}

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 0; padding: 20px; background-color: #f0f0f0; }\
.container { max-width: 600px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }\
h1 { color: #333; text-align: center; margin-bottom: 30px; }\
.value-display { background: #007bff; color: white; padding: 20px; text-align: center; border-radius: 5px; margin: 20px 0; transition: background-color 200ms ease, color 200ms ease; }\
.value-number { font-size: 3em; font-weight: bold; margin: 10px 0; }\
.info { background: #e9ecef; padding: 15px; border-radius: 5px; margin-top: 20px; }\
.refresh-btn { background: #28a745; color: white; padding: 10px 20px; border: none; border-radius: 5px; cursor: pointer; font-size: 16px; margin: 10px 5px; }\
.refresh-btn:hover { background: #218838; }\
.palette { display: grid; grid-template-columns: repeat(5, 1fr); gap: 8px; margin-top: 10px; }\
.color-btn { border: none; height: 36px; border-radius: 6px; cursor: pointer; }\
.color-btn:hover { filter: brightness(0.9); }";

// Text color flips to black once background luminance exceeds 0.6.
const SCRIPT_BODY: &str = "\
document.addEventListener('DOMContentLoaded', function(){\
  var valueBox = document.querySelector('.value-display');\
  function pickTextColor(bg){ try{ var c=bg.charAt(0)=='#'?bg.substring(1):bg; if(c.length===3){ c=c[0]+c[0]+c[1]+c[1]+c[2]+c[2]; } var n=parseInt(c,16); var r=(n>>16)&255, g=(n>>8)&255, b=n&255; var lum=(0.299*r+0.587*g+0.114*b)/255; return lum>0.6?'#000':'#fff'; }catch(e){ return '#fff'; } }\
  function applyColor(color){ if(!valueBox) return; valueBox.style.backgroundColor=color; valueBox.style.color=pickTextColor(color); }\
  window.setColor = function(color){ applyColor(color); fetch('/api/color', { method:'POST', headers:{'Content-Type':'application/x-www-form-urlencoded'}, body:'value='+encodeURIComponent(color) }).catch(function(){}); };\
  fetch('/api/color').then(function(r){ return r.json(); }).then(function(d){ if(d && d.color){ applyColor(d.color); } }).catch(function(){});\
});";

/// Render the complete HTML document.
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let mut html = String::with_capacity(6 * 1024);
    // Writing into a String cannot fail.
    let _ = write_page(&mut html, ctx);
    html
}

fn write_page(html: &mut String, ctx: &PageContext<'_>) -> core::fmt::Result {
    html.push_str("<!DOCTYPE html><html lang='en'><head>");
    html.push_str("<meta charset='UTF-8'>");
    html.push_str("<meta name='viewport' content='width=device-width, initial-scale=1.0'>");
    html.push_str("<title>ESP32 Monitor</title>");
    write!(html, "<style>{STYLE}</style>")?;
    write!(
        html,
        "<script>function refreshPage(){{ location.reload(); }}setInterval(refreshPage, {});{SCRIPT_BODY}</script>",
        u64::from(ctx.refresh_secs) * 1000
    )?;
    html.push_str("</head><body><div class='container'>");
    html.push_str("<h1>\u{1f321}\u{fe0f} ESP32 Monitor</h1>");

    write!(
        html,
        "<div class='value-display' style='background:{};'>",
        escape(ctx.color)
    )?;
    html.push_str("<div>Current value:</div>");
    write!(html, "<div class='value-number'>{:.1}</div>", ctx.sensor_value)?;
    html.push_str("</div>");
    html.push_str("<button class='refresh-btn' onclick='refreshPage()'>\u{1f504} Refresh</button>");

    html.push_str("<div class='palette'>");
    for c in PALETTE {
        write!(
            html,
            "<button class='color-btn' style='background:{c}' onclick='setColor(\"{c}\")' title='{c}'></button>"
        )?;
    }
    html.push_str("</div>");

    html.push_str("<div class='info'><strong>System information:</strong><br>");
    write!(html, "\u{2022} ESP32 IP: {}<br>", ctx.ap_ip)?;
    write!(html, "\u{2022} SSID: {}<br>", escape(ctx.ssid))?;
    write!(html, "\u{2022} Last update: {}s<br>", ctx.uptime_secs)?;
    write!(html, "\u{2022} Free heap: {} bytes", ctx.free_heap_bytes)?;
    html.push_str("</div></div></body></html>");
    Ok(())
}

/// Minimal HTML escaping for text and single-quoted attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
