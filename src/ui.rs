pub fn render_index(date: &str) -> String {
    INDEX_HTML.replace("{{DATE}}", date)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Pickup Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&display=swap');

    :root {
      --bg-1: #eef3f6;
      --bg-2: #cfe3d8;
      --ink: #22312e;
      --accent: #2e8b6d;
      --accent-2: #2f4858;
      --danger: #c0492f;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 18px 48px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 55%),
        linear-gradient(135deg, var(--bg-1), #e4efe8 60%, #f2f6f1 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 28px 18px 48px;
      display: flex;
      justify-content: center;
    }

    .app {
      width: min(980px, 100%);
      display: grid;
      gap: 20px;
    }

    header {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 22px 26px;
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 14px;
    }

    header h1 {
      margin: 0;
      font-size: 1.35rem;
      letter-spacing: 0.02em;
    }

    .controls {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    input[type="date"] {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.25);
      background: #fff;
    }

    button {
      font: inherit;
      font-weight: 600;
      border: none;
      border-radius: 10px;
      padding: 9px 16px;
      cursor: pointer;
      background: var(--accent);
      color: #fff;
      transition: transform 120ms ease, opacity 120ms ease;
    }

    button:hover {
      transform: translateY(-1px);
    }

    button:disabled {
      opacity: 0.5;
      cursor: wait;
      transform: none;
    }

    button.secondary {
      background: var(--accent-2);
    }

    #loader {
      display: none;
      align-items: center;
      gap: 10px;
      padding: 14px 20px;
      background: var(--card);
      border-radius: 14px;
      box-shadow: var(--shadow);
    }

    #loader.active {
      display: flex;
    }

    .spinner {
      width: 16px;
      height: 16px;
      border-radius: 50%;
      border: 3px solid rgba(46, 139, 109, 0.25);
      border-top-color: var(--accent);
      animation: spin 800ms linear infinite;
    }

    @keyframes spin {
      to { transform: rotate(360deg); }
    }

    .error-banner {
      background: #fbeae5;
      color: var(--danger);
      border-radius: 14px;
      padding: 14px 20px;
      box-shadow: var(--shadow);
    }

    .empty {
      background: var(--card);
      border-radius: 14px;
      padding: 18px 22px;
      box-shadow: var(--shadow);
      color: rgba(34, 49, 46, 0.7);
    }

    .device-card {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      overflow: hidden;
    }

    .device-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 10px;
      padding: 16px 22px;
      cursor: pointer;
    }

    .device-header:hover {
      background: rgba(46, 139, 109, 0.06);
    }

    .device-name {
      font-weight: 600;
      font-size: 1.05rem;
    }

    .device-stats {
      display: flex;
      align-items: center;
      gap: 12px;
      font-size: 0.92rem;
    }

    .badge {
      border-radius: 999px;
      padding: 3px 12px;
      font-weight: 600;
      color: #fff;
    }

    .badge.good { background: #2e8b6d; }
    .badge.medium { background: #d9a036; }
    .badge.poor { background: var(--danger); }

    .device-details {
      display: none;
      border-top: 1px solid rgba(47, 72, 88, 0.12);
      padding: 18px 22px;
      gap: 16px;
    }

    .device-details.open {
      display: grid;
    }

    .config-form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 10px;
      align-items: end;
    }

    .config-form label {
      display: grid;
      gap: 4px;
      font-size: 0.82rem;
      color: rgba(34, 49, 46, 0.75);
    }

    .config-form input {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.25);
    }

    .save-status {
      min-height: 1.2em;
      font-size: 0.88rem;
    }

    .save-status.ok { color: var(--accent); }
    .save-status.error { color: var(--danger); }

    .pickup-item {
      border: 1px solid rgba(47, 72, 88, 0.12);
      border-radius: 12px;
      padding: 10px 14px;
      margin-top: 8px;
      cursor: pointer;
      font-size: 0.9rem;
      display: flex;
      flex-wrap: wrap;
      gap: 14px;
    }

    .pickup-item:hover {
      border-color: var(--accent);
    }

    #detail-pane {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 18px 22px;
      display: none;
    }

    #detail-pane.open {
      display: block;
    }

    .detail-row {
      display: grid;
      grid-template-columns: 140px 1fr;
      gap: 8px;
      padding: 4px 0;
      font-size: 0.92rem;
    }

    .detail-row .label {
      color: rgba(34, 49, 46, 0.6);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Waste Collection Pickups</h1>
      <div class="controls">
        <input type="date" id="collection-date" value="{{DATE}}" />
        <button id="load-btn">Load day</button>
      </div>
    </header>

    <div id="loader"><span class="spinner"></span><span>Loading pickups…</span></div>
    <section id="overview"><p class="empty">Pick a date and load a day.</p></section>
    <section id="detail-pane"></section>
  </main>

  <script>
    let devices = [];

    const overview = document.getElementById('overview');
    const detailPane = document.getElementById('detail-pane');
    const loader = document.getElementById('loader');
    const loadBtn = document.getElementById('load-btn');
    const dateInput = document.getElementById('collection-date');

    const esc = (value) => {
      const div = document.createElement('div');
      div.textContent = value == null ? '' : String(value);
      return div.innerHTML;
    };

    const badge = (device) => {
      if (device.isHandheldReader) return '';
      let cls = 'poor';
      if (device.rfidPercentage >= 80) cls = 'good';
      else if (device.rfidPercentage >= 50) cls = 'medium';
      return `<span class="badge ${cls}">${device.rfidPercentage}%</span>`;
    };

    const pickupItems = (device) => {
      if (!device.pickups.length) return '<p>No pickups for this day.</p>';
      return device.pickups.map((pickup, i) => `
        <div class="pickup-item" data-device="${esc(device.deviceId)}" data-index="${i}">
          <span><strong>Time:</strong> ${esc(pickup.dateTime)}</span>
          <span><strong>RFID:</strong> ${esc(pickup.rfidValue || 'None')}</span>
          <span><strong>Facility:</strong> ${esc(pickup.facilityName || '-')}</span>
        </div>
      `).join('');
    };

    const deviceCard = (device) => `
      <div class="device-card" data-device="${esc(device.deviceId)}">
        <div class="device-header">
          <span class="device-name">${esc(device.deviceName)}</span>
          <div class="device-stats">
            <span>Pickups: ${device.totalPickups}</span>
            <span>RFID: ${device.withRfid}</span>
            ${badge(device)}
          </div>
        </div>
        <div class="device-details">
          <form class="config-form">
            <label>Assigned to
              <input name="responsiblePerson" value="${esc(device.responsiblePerson || '')}" />
            </label>
            <label>Registration
              <input name="regOznaka" value="${esc(device.regOznaka || '')}" />
            </label>
            <label>Note
              <input name="napomena" value="${esc(device.napomena || '')}" />
            </label>
            <button type="submit" class="secondary">Save</button>
          </form>
          <div class="save-status"></div>
          <h4>Pickups (${device.totalPickups})</h4>
          <div class="pickups-list">${pickupItems(device)}</div>
        </div>
      </div>
    `;

    const render = () => {
      detailPane.classList.remove('open');
      detailPane.innerHTML = '';
      if (!devices.length) {
        overview.innerHTML = '<p class="empty">No data available for selected date.</p>';
        return;
      }
      overview.innerHTML = devices.map(deviceCard).join('');

      overview.querySelectorAll('.device-header').forEach((header) => {
        header.addEventListener('click', () => {
          header.nextElementSibling.classList.toggle('open');
        });
      });

      overview.querySelectorAll('.config-form').forEach((form) => {
        form.addEventListener('submit', (event) => {
          event.preventDefault();
          const card = form.closest('.device-card');
          saveEdit(card.dataset.device, form, form.nextElementSibling);
        });
      });

      overview.querySelectorAll('.pickup-item').forEach((item) => {
        item.addEventListener('click', () => {
          showPickup(item.dataset.device, Number(item.dataset.index));
        });
      });
    };

    const showPickup = (deviceId, index) => {
      const device = devices.find((d) => d.deviceId === deviceId);
      const pickup = device && device.pickups[index];
      if (!pickup) return;

      const coords = pickup.latitude != null && pickup.longitude != null
        ? `${pickup.latitude}, ${pickup.longitude}`
        : 'Not available';
      const rows = [
        ['Date/Time', pickup.dateTime || 'N/A'],
        ['Device', device.deviceName],
        ['Collection ID', pickup.collectionId || 'N/A'],
        ['Facility Name', pickup.facilityName || '-'],
        ['Facility Code', pickup.facilityCode || '-'],
        ['RFID Value', pickup.rfidValue || 'None'],
        ['RFID Type', pickup.rfidType || 'None'],
        ['Coordinates', coords],
      ];
      detailPane.innerHTML = '<h3>Pickup Details</h3>' + rows.map(([label, value]) => `
        <div class="detail-row"><span class="label">${esc(label)}</span><span>${esc(value)}</span></div>
      `).join('');
      detailPane.classList.add('open');
      detailPane.scrollIntoView({ behavior: 'smooth' });
    };

    const loadDay = async () => {
      const date = dateInput.value;
      if (!date) {
        overview.innerHTML = '<div class="error-banner">Please select a date first.</div>';
        return;
      }

      loader.classList.add('active');
      loadBtn.disabled = true;
      try {
        const res = await fetch(`/api/day?date=${encodeURIComponent(date)}`);
        if (!res.ok) {
          throw new Error(await res.text() || `Request failed (${res.status})`);
        }
        const body = await res.json();
        devices = body.devices;
        render();
      } catch (err) {
        devices = [];
        overview.innerHTML = `
          <div class="error-banner">
            <h3>Error Loading Data</h3>
            <p>${esc(err.message)}</p>
          </div>
        `;
      } finally {
        loader.classList.remove('active');
        loadBtn.disabled = false;
      }
    };

    const saveEdit = async (deviceId, form, statusLine) => {
      statusLine.textContent = 'Saving…';
      statusLine.className = 'save-status';
      const payload = {
        deviceId,
        responsiblePerson: form.elements.responsiblePerson.value,
        regOznaka: form.elements.regOznaka.value,
        napomena: form.elements.napomena.value,
      };

      try {
        const res = await fetch('/api/edit', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(payload)
        });
        if (!res.ok) {
          throw new Error(await res.text() || `Request failed (${res.status})`);
        }
        const updated = await res.json();
        devices = devices.map((d) => d.deviceId === updated.deviceId ? updated : d);
        statusLine.textContent = 'Saved';
        statusLine.className = 'save-status ok';
        setTimeout(() => { statusLine.textContent = ''; }, 1500);
      } catch (err) {
        statusLine.textContent = err.message;
        statusLine.className = 'save-status error';
      }
    };

    loadBtn.addEventListener('click', loadDay);
  </script>
</body>
</html>
"#;
